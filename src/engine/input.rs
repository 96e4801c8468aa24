//! Input methods for Stage

use super::Stage;
use crate::input::{InputEvent, KeyAction};
use crate::renderer::SceneRenderer;

impl<R: SceneRenderer> Stage<R> {
    /// Process a platform-agnostic input event.
    ///
    /// Pointer and modifier events go to the orbit controller. Returns
    /// `true` if the controller consumed the event.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.controller.handle_input(event)
    }

    /// Run the action bound to `key` (a winit `KeyCode` debug name such as
    /// `"KeyR"`), if any. Returns the action that ran.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        log::debug!("key {key} -> {action:?}");
        action.execute(self);
        Some(action)
    }

    /// Ask the host to close. Nothing else changes.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn toggle_nav(&mut self) {
        self.nav.visible = !self.nav.visible;
        log::debug!("nav visible: {}", self.nav.visible);
    }
}

// ── KeyAction execution ──

impl KeyAction {
    /// Execute this action on the given stage.
    pub fn execute<R: SceneRenderer>(self, stage: &mut Stage<R>) {
        match self {
            Self::ToggleAutoRotate => {
                let _ = stage.controller.toggle_auto_rotate();
            }
            Self::ResetCamera => stage.controller.reset(),
            Self::ToggleNav => stage.toggle_nav(),
            Self::Quit => stage.request_quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::engine::tests::stage_with;
    use crate::input::{InputEvent, KeyAction, MouseButton};
    use crate::options::Options;

    #[test]
    fn bound_keys_dispatch() {
        let (mut stage, _) = stage_with(Options::default());
        assert_eq!(stage.handle_key("KeyR"), Some(KeyAction::ToggleAutoRotate));
        assert!(!stage.controller().options().auto_rotate);
        assert_eq!(stage.handle_key("KeyN"), Some(KeyAction::ToggleNav));
        assert!(!stage.nav().visible);
        assert_eq!(stage.handle_key("KeyZ"), None);
        assert!(!stage.quit_requested());
        assert_eq!(stage.handle_key("Escape"), Some(KeyAction::Quit));
        assert!(stage.quit_requested());
    }

    #[test]
    fn reset_returns_camera_home() {
        let (mut stage, t0) = stage_with(Options::default());
        for _ in 0..100 {
            stage.advance(t0);
        }
        assert!((stage.camera().eye - Vec3::new(0.0, 0.0, 20.0)).length() > 1.0);

        KeyAction::ToggleAutoRotate.execute(&mut stage);
        KeyAction::ResetCamera.execute(&mut stage);
        stage.advance(t0);
        assert!((stage.camera().eye - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn left_drag_is_consumed() {
        let (mut stage, _) = stage_with(Options::default());
        assert!(stage.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        }));
        assert!(stage.controller().is_dragging());
        assert!(!stage.handle_input(InputEvent::Scroll { delta: 3.0 }));
    }
}
