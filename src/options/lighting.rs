use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Point light and ambient light parameters.
pub struct LightingOptions {
    /// Point light world position.
    #[schemars(skip)]
    pub point_position: [f32; 3],
    /// Point light color.
    #[schemars(title = "Point Light Color")]
    pub point_color: Color,
    /// Point light intensity (candela-like units, falls off with distance²).
    #[schemars(title = "Point Light Intensity", range(min = 0.0, max = 400.0), extend("step" = 1.0))]
    pub point_intensity: f32,
    /// Distance at which the point light's contribution reaches zero
    /// (0 = infinite).
    #[schemars(title = "Point Light Range", range(min = 0.0, max = 200.0), extend("step" = 1.0))]
    pub point_distance: f32,
    /// Falloff exponent applied to distance.
    #[schemars(skip)]
    pub point_decay: f32,
    /// Ambient light color.
    #[schemars(title = "Ambient Color")]
    pub ambient_color: Color,
    /// Ambient light intensity.
    #[schemars(title = "Ambient Intensity", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            point_position: [0.0, 10.0, 10.0],
            point_color: Color::WHITE,
            point_intensity: 100.0,
            point_distance: 100.0,
            point_decay: 2.0,
            ambient_color: Color::from_rgb_u32(0x0040_4040),
            ambient_intensity: 1.0,
        }
    }
}
