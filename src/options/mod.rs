//! Centralized scene/display options with TOML preset support.
//!
//! Every tweakable constant of the demo (camera, orbit controls, scene
//! geometry and colors, lighting, display, intro animation, keybindings) is
//! consolidated here. Options serialize to/from TOML.

mod camera;
mod controls;
mod display;
mod intro;
mod keybindings;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use display::DisplayOptions;
pub use intro::{IntroOptions, Sequencing};
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StageError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Orbit control behavior.
    pub controls: ControlsOptions,
    /// Sphere and plane parameters.
    pub scene: SceneOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Window, resolution and nav bar options.
    pub display: DisplayOptions,
    /// Startup animation options.
    pub intro: IntroOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, StageError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| StageError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, StageError> {
        let content = std::fs::read_to_string(path).map_err(StageError::Io)?;
        let opts = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), StageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StageError::Io)?;
        }
        std::fs::write(path, content).map_err(StageError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::util::color::Color;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[controls]
auto_rotate_speed = 2.0

[scene]
sphere_color = "#ff0000"
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.controls.auto_rotate_speed, 2.0);
        assert_eq!(opts.scene.sphere_color, Color::from_rgb_u32(0x00ff_0000));
        // Everything else should be default
        assert!(opts.controls.auto_rotate);
        assert!(!opts.controls.enable_pan);
        assert_eq!(opts.scene.sphere_radius, 3.0);
        assert_eq!(opts.display.pixel_ratio, 2.0);
        assert_eq!(opts.intro.sequencing, Sequencing::Concurrent);
    }

    #[test]
    fn defaults_match_demo_scene() {
        let opts = Options::default();
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.camera.zfar, 100.0);
        assert_eq!(opts.camera.distance, 20.0);
        assert_eq!(opts.scene.sphere_color.to_hex(), "#00ff83");
        assert_eq!(opts.scene.plane_color.to_hex(), "#00fff0");
        assert_eq!(opts.lighting.point_position, [0.0, 10.0, 10.0]);
        assert_eq!(opts.lighting.ambient_color.to_hex(), "#404040");
        assert_eq!(opts.intro.duration_secs, 1.0);
        assert_eq!(opts.intro.easing, EasingFunction::QuadraticOut);
    }

    #[test]
    fn bundled_preset_parses() {
        let opts = Options::from_toml(include_str!(
            "../../assets/presets/calm.toml"
        ))
        .unwrap();
        assert!(opts.controls.enable_zoom);
        assert_eq!(opts.intro.sequencing, Sequencing::Sequential);
        assert_eq!(opts.intro.easing, EasingFunction::CubicInOut);
        assert_eq!(opts.camera, CameraOptions::default());
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let err = Options::from_toml("[scene]\nplane_color = \"teal\"\n")
            .unwrap_err();
        assert!(matches!(err, StageError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup_survives_load() {
        let opts = Options::from_toml(
            "[keybindings.bindings]\ntoggle_auto_rotate = \"KeyA\"\n",
        )
        .unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyA"),
            Some(KeyAction::ToggleAutoRotate)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), None);

        let defaults = Options::default();
        assert_eq!(defaults.keybindings.lookup("KeyQ"), Some(KeyAction::ResetCamera));
        assert_eq!(defaults.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "sphere-stage-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.display.pixel_ratio = 1.5;
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("scene"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("intro"));
        assert!(!props.contains_key("keybindings"));

        let controls = &props["controls"]["properties"];
        assert!(controls.get("auto_rotate_speed").is_some());
        assert!(controls.get("min_distance").is_none());
    }
}
