use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit control behavior: damping, auto-rotation and which gestures are
/// enabled.
pub struct ControlsOptions {
    /// Smooth user rotation by easing toward the drag target.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied each frame when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Allow shift-drag panning.
    #[schemars(title = "Pan")]
    pub enable_pan: bool,
    /// Pan sensitivity multiplier.
    #[schemars(skip)]
    pub pan_speed: f32,
    /// Allow scroll-wheel zoom.
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Zoom sensitivity multiplier.
    #[schemars(skip)]
    pub zoom_speed: f32,
    /// Closest allowed orbit distance when zooming.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed orbit distance when zooming.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Rotate the camera around the target while the user is not dragging.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotation rate; 1.0 is one orbit per minute at 60 fps.
    #[schemars(title = "Auto Rotate Speed", range(min = -20.0, max = 20.0), extend("step" = 0.5))]
    pub auto_rotate_speed: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            enable_pan: false,
            pan_speed: 1.0,
            enable_zoom: false,
            zoom_speed: 1.0,
            min_distance: 1.0,
            max_distance: 100.0,
            auto_rotate: true,
            auto_rotate_speed: 5.0,
        }
    }
}
