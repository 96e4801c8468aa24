use crate::util::color::Color;

/// Which faces of a mesh are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Counter-clockwise (front) faces only.
    #[default]
    Front,
    /// Clockwise (back) faces only.
    Back,
    /// Both faces; back faces are lit with the flipped normal.
    Double,
}

impl Side {
    /// The wgpu cull mode that keeps this side visible.
    #[must_use]
    pub fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            Self::Front => Some(wgpu::Face::Back),
            Self::Back => Some(wgpu::Face::Front),
            Self::Double => None,
        }
    }
}

/// Physically-based surface description (metal/rough workflow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (sRGB).
    pub color: Color,
    /// Micro-surface roughness in `[0, 1]`.
    pub roughness: f32,
    /// Metalness in `[0, 1]`.
    pub metalness: f32,
    /// Rasterized faces.
    pub side: Side,
}

impl Material {
    /// Fully rough, non-metallic, front-faced material of the given color.
    #[must_use]
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
            side: Side::Front,
        }
    }

    /// Same material with a different face side.
    #[must_use]
    pub fn with_side(self, side: Side) -> Self {
        Self { side, ..self }
    }

    /// Same material with roughness and metalness clamped into `[0, 1]`.
    #[must_use]
    pub fn with_surface(self, roughness: f32, metalness: f32) -> Self {
        Self {
            roughness: roughness.clamp(0.0, 1.0),
            metalness: metalness.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_sided_disables_culling() {
        assert_eq!(Side::Double.cull_mode(), None);
        assert_eq!(Side::Front.cull_mode(), Some(wgpu::Face::Back));
    }

    #[test]
    fn surface_parameters_clamp() {
        let m = Material::standard(Color::WHITE).with_surface(1.5, -0.2);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.metalness, 0.0);
    }
}
