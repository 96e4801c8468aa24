//! Options methods for Stage

use super::Stage;
use crate::nav::NavBar;
use crate::options::Options;
use crate::renderer::SceneRenderer;

impl<R: SceneRenderer> Stage<R> {
    /// The active options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply the changes that can take effect live.
    ///
    /// Scene, lighting and intro options only shape construction; changes
    /// to them are kept but apply to the next [`Stage`].
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the controller, camera, nav bar and
    /// renderer.
    pub fn apply_options(&mut self) {
        self.apply_camera();
        self.controller.set_options(self.options.controls.clone());
        self.apply_nav_style();
        self.renderer
            .set_pixel_ratio(self.options.display.pixel_ratio);
        log::debug!("options applied");
    }

    /// Push projection options to the camera.
    fn apply_camera(&mut self) {
        let co = &self.options.camera;
        self.camera.fovy = co.fovy;
        self.camera.znear = co.znear;
        self.camera.zfar = co.zfar;
        self.camera.update_projection_matrix();
        self.controller.set_fovy(co.fovy);
    }

    /// Restyle the nav bar, keeping its animated offset and whether it was
    /// toggled on or off.
    fn apply_nav_style(&mut self) {
        self.nav = NavBar {
            offset_percent: self.nav.offset_percent,
            visible: self.nav.visible,
            ..NavBar::from_options(&self.options.display)
        };
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::tests::stage_with;
    use crate::input::KeyAction;
    use crate::options::Options;

    #[test]
    fn live_options_reach_subsystems() {
        let (mut stage, _) = stage_with(Options::default());
        let mut options = stage.options().clone();
        options.camera.fovy = 60.0;
        options.controls.auto_rotate = false;
        options.display.pixel_ratio = 1.0;
        options.display.nav_height = 32.0;
        stage.set_options(options);

        assert_eq!(stage.camera().fovy, 60.0);
        assert!(!stage.controller().options().auto_rotate);
        assert_eq!(stage.renderer().pixel_ratio, Some(1.0));
        assert_eq!(stage.nav().height_px, 32.0);
        // Mid-intro offset survives a restyle.
        assert_eq!(stage.nav().offset_percent, -100.0);
        assert_eq!(stage.controller().fovy(), 60.0);
    }

    #[test]
    fn hidden_nav_stays_hidden_across_option_changes() {
        let (mut stage, _) = stage_with(Options::default());
        KeyAction::ToggleNav.execute(&mut stage);
        assert!(!stage.nav().visible);

        let mut options = stage.options().clone();
        options.display.nav_opacity = 0.5;
        stage.set_options(options);
        assert!(!stage.nav().visible);
        assert_eq!(stage.nav().opacity, 0.5);
    }
}
