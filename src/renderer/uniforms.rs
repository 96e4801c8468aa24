//! GPU uniform layouts. Field order and padding mirror the WGSL structs in
//! `assets/shaders/`.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::nav::NavBar;
use crate::scene::{Light, Material, Scene, Transform};

/// Camera data for the mesh shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Eye position in world space.
    pub eye: [f32; 3],
    /// Padding for GPU alignment.
    pub _pad: f32,
}

impl CameraUniform {
    /// Snapshot of the camera's current matrices.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            eye: camera.eye.to_array(),
            _pad: 0.0,
        }
    }
}

/// One point light and one ambient term, colors in linear space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Point light world position.
    pub point_position: [f32; 3],
    /// Point light intensity (0 when the scene has none).
    pub point_intensity: f32,
    /// Point light color.
    pub point_color: [f32; 3],
    /// Point light cutoff distance (0 = unlimited).
    pub point_distance: f32,
    /// Ambient color.
    pub ambient_color: [f32; 3],
    /// Point light falloff exponent.
    pub point_decay: f32,
    /// Ambient intensity (0 when the scene has none).
    pub ambient_intensity: f32,
    /// Padding for GPU alignment.
    pub _pad: [f32; 3],
}

impl LightingUniform {
    /// Collect the scene's lights. The first point light is used; ambient
    /// lights are summed.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniform = Self::zeroed_lights();
        let mut have_point = false;
        let mut ambient = Vec3::ZERO;

        for (light, transform) in scene.lights() {
            match light {
                Light::Point(point) if !have_point => {
                    have_point = true;
                    uniform.point_position = transform.position.to_array();
                    uniform.point_color = point.color.to_linear();
                    uniform.point_intensity = point.intensity;
                    uniform.point_distance = point.distance;
                    uniform.point_decay = point.decay;
                }
                Light::Point(_) => {
                    log::trace!("extra point light ignored");
                }
                Light::Ambient(a) => {
                    ambient += Vec3::from(a.color.to_linear()) * a.intensity;
                }
            }
        }

        uniform.ambient_color = ambient.to_array();
        uniform.ambient_intensity = 1.0;
        uniform
    }

    fn zeroed_lights() -> Self {
        Self {
            point_position: [0.0; 3],
            point_intensity: 0.0,
            point_color: [0.0; 3],
            point_distance: 0.0,
            ambient_color: [0.0; 3],
            point_decay: 2.0,
            ambient_intensity: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// Per-mesh transform and material.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Object-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix, widened to 4×4.
    pub normal: [[f32; 4]; 4],
    /// Linear base color and alpha.
    pub color: [f32; 4],
    /// `[roughness, metalness, 0, 0]`.
    pub surface: [f32; 4],
}

impl ModelUniform {
    /// Uniform for a mesh at `transform` with `material`.
    #[must_use]
    pub fn new(transform: &Transform, material: &Material) -> Self {
        let [r, g, b] = material.color.to_linear();
        Self {
            model: transform.matrix().to_cols_array_2d(),
            normal: Mat4::from_mat3(transform.normal_matrix()).to_cols_array_2d(),
            color: [r, g, b, 1.0],
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        }
    }
}

/// Nav bar rectangle and fill for the overlay shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NavUniform {
    /// `[top, bottom, 0, 0]` edges in normalized device coordinates.
    pub span: [f32; 4],
    /// Linear color and opacity.
    pub color: [f32; 4],
}

impl NavUniform {
    /// Overlay for `nav` on an output `output_height` pixels tall, or `None`
    /// when no part of the bar is visible.
    #[must_use]
    pub fn from_nav(nav: &NavBar, output_height: u32) -> Option<Self> {
        if output_height == 0 {
            return None;
        }
        let (top, bottom) = nav.visible_span()?;
        let to_ndc = |px: f32| 1.0 - 2.0 * px / output_height as f32;
        let [r, g, b] = nav.color.to_linear();
        Some(Self {
            span: [to_ndc(top), to_ndc(bottom), 0.0, 0.0],
            color: [r, g, b, nav.opacity],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DisplayOptions, LightingOptions, SceneOptions};
    use crate::scene::DemoScene;

    #[test]
    fn sizes_match_wgsl_layouts() {
        assert_eq!(size_of::<CameraUniform>(), 80);
        assert_eq!(size_of::<LightingUniform>(), 64);
        assert_eq!(size_of::<ModelUniform>(), 160);
        assert_eq!(size_of::<NavUniform>(), 32);
    }

    #[test]
    fn lighting_collects_demo_lights() {
        let demo = DemoScene::assemble(&SceneOptions::default(), &LightingOptions::default());
        let lighting = LightingUniform::from_scene(&demo.scene);
        assert_eq!(lighting.point_position, [0.0, 10.0, 10.0]);
        assert_eq!(lighting.point_intensity, 100.0);
        assert_eq!(lighting.point_distance, 100.0);
        assert_eq!(lighting.point_color, [1.0, 1.0, 1.0]);
        // #404040 is dim but non-zero in linear space.
        assert!(lighting.ambient_color[0] > 0.0 && lighting.ambient_color[0] < 0.1);
    }

    #[test]
    fn empty_scene_is_unlit() {
        let lighting = LightingUniform::from_scene(&Scene::new());
        assert_eq!(lighting.point_intensity, 0.0);
        assert_eq!(lighting.ambient_color, [0.0; 3]);
    }

    #[test]
    fn nav_span_maps_to_ndc() {
        let mut nav = NavBar::from_options(&DisplayOptions::default());
        let uniform = NavUniform::from_nav(&nav, 640).unwrap();
        assert_eq!(uniform.span[0], 1.0);
        assert!((uniform.span[1] - 0.8).abs() < 1e-6);
        assert_eq!(uniform.color[3], 0.85);

        nav.offset_percent = -100.0;
        assert!(NavUniform::from_nav(&nav, 640).is_none());
        nav.offset_percent = 0.0;
        assert!(NavUniform::from_nav(&nav, 0).is_none());
    }
}
