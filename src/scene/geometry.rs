//! Parametric shapes and their triangle tessellation.
//!
//! Tessellation follows the usual UV-sphere and grid-plane layouts: rows of
//! `segments + 1` vertices, counter-clockwise front faces, and no degenerate
//! triangles at the sphere poles.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Interleaved vertex layout shared by every mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

/// Triangle-list geometry ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, three per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A parametric shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// UV sphere centered on the origin.
    Sphere {
        /// Sphere radius.
        radius: f32,
        /// Segments around the equator (minimum 3).
        width_segments: u32,
        /// Segments from pole to pole (minimum 2).
        height_segments: u32,
    },
    /// Flat rectangle in the XY plane facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
}

impl Geometry {
    /// Sphere of the given radius and tessellation, with segment counts
    /// raised to their minimums.
    #[must_use]
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Single-quad plane.
    #[must_use]
    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    /// Generate the triangle mesh for this shape.
    #[must_use]
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => tessellate_sphere(radius, width_segments, height_segments),
            Self::Plane { width, height } => tessellate_plane(width, height),
        }
    }
}

fn tessellate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let row = width_segments + 1;
    let mut vertices = Vec::with_capacity((row * (height_segments + 1)) as usize);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let dir = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            vertices.push(Vertex {
                position: (dir * radius).to_array(),
                normal: dir.normalize_or(Vec3::Y).to_array(),
            });
        }
    }

    let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Skip the zero-area triangle of each pole fan.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

fn tessellate_plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex {
            position: [-hw, hh, 0.0],
            normal,
        },
        Vertex {
            position: [hw, hh, 0.0],
            normal,
        },
        Vertex {
            position: [-hw, -hh, 0.0],
            normal,
        },
        Vertex {
            position: [hw, -hh, 0.0],
            normal,
        },
    ];
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let p = |i: usize| Vec3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    #[test]
    fn sphere_counts_match_tessellation() {
        let mesh = Geometry::sphere(3.0, 64, 64).tessellate();
        assert_eq!(mesh.vertices.len(), 65 * 65);
        // Two triangles per quad, minus one per quad in the two pole rows.
        assert_eq!(mesh.triangle_count(), 64 * 64 * 2 - 2 * 64);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = Geometry::sphere(3.0, 16, 12).tessellate();
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            assert!((p.length() - 3.0).abs() < 1e-4);
            assert!((Vec3::from(v.normal) - p / 3.0).length() < 1e-4);
        }
    }

    #[test]
    fn sphere_faces_point_outward() {
        let mesh = Geometry::sphere(1.0, 8, 6).tessellate();
        for tri in 0..mesh.triangle_count() {
            let centroid: Vec3 = (0..3)
                .map(|i| Vec3::from(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position))
                .sum::<Vec3>()
                / 3.0;
            assert!(triangle_normal(&mesh, tri).dot(centroid) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn sphere_segments_are_clamped() {
        assert_eq!(
            Geometry::sphere(1.0, 0, 1),
            Geometry::Sphere {
                radius: 1.0,
                width_segments: 3,
                height_segments: 2
            }
        );
    }

    #[test]
    fn plane_faces_plus_z() {
        let mesh = Geometry::plane(10.0, 10.0).tessellate();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for tri in 0..2 {
            assert!(triangle_normal(&mesh, tri).normalize().abs_diff_eq(Vec3::Z, 1e-6));
        }
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 5.0);
    }
}
