//! Tween animation: from/to tweens on a one-shot timeline, and the startup
//! intro built from them.

/// The startup intro timeline.
pub mod intro;
pub mod timeline;
/// Single from/to tweens.
pub mod tween;

pub use intro::{intro_timeline, SceneTargets};
pub use timeline::{Position, Timeline, TimelineState, TweenSink};
pub use tween::{Tween, TweenTarget, TweenValue};
