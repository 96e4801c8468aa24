//! Input handling: platform-agnostic pointer events and key actions.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable actions.
pub mod keyboard;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
