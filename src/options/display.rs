use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window, output resolution and navigation bar styling.
pub struct DisplayOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Internal resolution multiplier over the surface size. Values above 1
    /// supersample; the result is clamped to the device texture limit.
    #[schemars(title = "Pixel Ratio", range(min = 0.5, max = 4.0), extend("step" = 0.25))]
    pub pixel_ratio: f32,
    /// Background clear color.
    #[schemars(title = "Background")]
    pub clear_color: Color,
    /// Draw the navigation bar overlay.
    #[schemars(title = "Show Nav Bar")]
    pub show_nav: bool,
    /// Navigation bar height in physical pixels.
    #[schemars(title = "Nav Height", range(min = 16.0, max = 200.0), extend("step" = 1.0))]
    pub nav_height: f32,
    /// Navigation bar fill color.
    #[schemars(title = "Nav Color")]
    pub nav_color: Color,
    /// Navigation bar opacity.
    #[schemars(title = "Nav Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub nav_opacity: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "Sphere Stage".into(),
            pixel_ratio: 2.0,
            clear_color: Color::BLACK,
            show_nav: true,
            nav_height: 64.0,
            nav_color: Color::from_rgb_u32(0x0012_1212),
            nav_opacity: 0.85,
        }
    }
}
