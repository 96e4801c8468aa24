use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// How the intro tweens are placed on the timeline relative to each other.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Sequencing {
    /// Every tween starts at time zero.
    #[default]
    Concurrent,
    /// Each tween starts when the previous one ends.
    Sequential,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Intro", inline)]
#[serde(default)]
/// Startup animation parameters.
pub struct IntroOptions {
    /// Play the intro at startup. When disabled the scene starts at its
    /// final state.
    #[schemars(title = "Play Intro")]
    pub enabled: bool,
    /// Duration of each tween in seconds.
    #[schemars(title = "Duration", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub duration_secs: f32,
    /// Easing curve shared by the intro tweens.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Whether the tweens play together or one after another.
    #[schemars(title = "Sequencing")]
    pub sequencing: Sequencing,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_secs: 1.0,
            easing: EasingFunction::DEFAULT,
            sequencing: Sequencing::Concurrent,
        }
    }
}
