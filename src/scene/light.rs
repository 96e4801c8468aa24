use crate::util::color::Color;

/// Omnidirectional light positioned by its node transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light color (sRGB).
    pub color: Color,
    /// Luminous intensity.
    pub intensity: f32,
    /// Range after which the contribution is zero (0 = unlimited).
    pub distance: f32,
    /// Distance falloff exponent (2 = inverse square).
    pub decay: f32,
}

/// Uniform light reaching every surface equally, with no position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Light color (sRGB).
    pub color: Color,
    /// Intensity multiplier.
    pub intensity: f32,
}

/// A light source in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Positional light with distance falloff.
    Point(PointLight),
    /// Flat ambient term.
    Ambient(AmbientLight),
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Self::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Self::Ambient(light)
    }
}
