use serde::{Deserialize, Serialize};

/// Stage-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_auto_rotate = "KeyR"
/// reset_camera = "KeyQ"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Start or stop the turntable auto-rotation.
    ToggleAutoRotate,
    /// Return the camera to its initial orbit position.
    ResetCamera,
    /// Show or hide the navigation bar overlay.
    ToggleNav,
    /// Close the viewer.
    Quit,
}
