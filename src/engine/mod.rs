//! The application context.
//!
//! [`Stage`] owns everything the demo mutates: the scene, the camera and
//! its orbit controller, the viewport size, the nav bar, the intro timeline
//! and the renderer. Hosts hold it by value and call into it by `&mut`
//! from their resize, input and refresh callbacks.

/// Per-refresh driving and the fixed-step fallback loop.
pub mod frame;
mod input;
mod options;

use web_time::Instant;

use self::frame::FrameTarget;
use crate::animation::{intro_timeline, SceneTargets, Timeline};
use crate::camera::{Camera, OrbitController};
use crate::error::StageError;
use crate::nav::NavBar;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{DemoScene, NodeId, Scene};
use crate::viewport::ViewportSize;

/// Scene, camera, controls, nav bar, intro and renderer for one output.
pub struct Stage<R: SceneRenderer> {
    scene: Scene,
    sphere: NodeId,
    plane: NodeId,
    camera: Camera,
    controller: OrbitController,
    viewport: ViewportSize,
    nav: NavBar,
    intro: Timeline,
    renderer: R,
    options: Options,
    quit_requested: bool,
}

impl<R: SceneRenderer> Stage<R> {
    /// Assemble the scene, size `renderer` for `viewport` and start the
    /// intro at `now` (or jump straight to its end state when the intro is
    /// disabled).
    pub fn new(
        mut renderer: R,
        viewport: ViewportSize,
        options: Options,
        now: Instant,
    ) -> Self {
        let DemoScene {
            mut scene,
            sphere,
            plane,
            ..
        } = DemoScene::assemble(&options.scene, &options.lighting);

        let camera = Camera::from_options(&options.camera, viewport.aspect());
        let controller = OrbitController::new(
            &camera,
            options.controls.clone(),
            viewport.height,
        );
        let mut nav = NavBar::from_options(&options.display);

        renderer.set_size(viewport.width, viewport.height);
        renderer.set_pixel_ratio(options.display.pixel_ratio);

        let mut intro = intro_timeline(&options.intro, sphere);
        let mut targets = SceneTargets {
            scene: &mut scene,
            nav: &mut nav,
        };
        if options.intro.enabled {
            intro.start(now, &mut targets);
        } else {
            intro.seek(intro.duration(), &mut targets);
            log::debug!("intro disabled");
        }

        log::info!(
            "stage ready: {}x{}, pixel ratio {}",
            viewport.width,
            viewport.height,
            options.display.pixel_ratio
        );

        Self {
            scene,
            sphere,
            plane,
            camera,
            controller,
            viewport,
            nav,
            intro,
            renderer,
            options,
            quit_requested: false,
        }
    }

    /// Adapt to a new output size: record it, refresh the camera projection
    /// and resize the renderer. A zero height gives a non-finite aspect,
    /// which is accepted; the renderer pauses drawing until the size is
    /// non-zero.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = ViewportSize::new(width, height);
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection_matrix();
        self.controller.set_viewport_height(height);
        self.renderer.set_size(width, height);
        log::debug!("resized to {width}x{height}");
    }

    /// Step the orbit controller, then the intro.
    pub fn advance(&mut self, now: Instant) {
        self.controller.advance(&mut self.camera);
        if self.intro.is_running() {
            let _ = self.intro.update(
                now,
                &mut SceneTargets {
                    scene: &mut self.scene,
                    nav: &mut self.nav,
                },
            );
        }
    }

    /// Draw the current state.
    pub fn draw(&mut self) -> Result<(), StageError> {
        self.renderer.draw(&self.scene, &self.camera, &self.nav)
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Id of the sphere node.
    pub fn sphere(&self) -> NodeId {
        self.sphere
    }

    /// Id of the plane node.
    pub fn plane(&self) -> NodeId {
        self.plane
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit controller.
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Current output size.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// The nav bar.
    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    /// The intro timeline.
    pub fn intro(&self) -> &Timeline {
        &self.intro
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Whether a quit key was pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl<R: SceneRenderer> FrameTarget for Stage<R> {
    fn advance(&mut self, now: Instant) {
        Stage::advance(self, now);
    }

    fn draw(&mut self) -> Result<(), StageError> {
        Stage::draw(self)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::f32::consts::{PI, TAU};

    use glam::Vec3;
    use web_time::Duration;

    use super::frame::{FixedStepLoop, FrameDriver, RefreshScheduler};
    use super::*;
    use crate::input::{InputEvent, KeyAction, MouseButton};
    use crate::options::ControlsOptions;

    /// Records what the stage asked of it.
    #[derive(Debug, Default)]
    pub(crate) struct MockRenderer {
        pub(crate) sizes: Vec<(u32, u32)>,
        pub(crate) pixel_ratio: Option<f32>,
        pub(crate) draws: u32,
        pub(crate) last_nav_offset: Option<f32>,
        pub(crate) last_eye: Option<Vec3>,
    }

    impl SceneRenderer for MockRenderer {
        fn set_size(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }

        fn set_pixel_ratio(&mut self, ratio: f32) {
            self.pixel_ratio = Some(ratio);
        }

        fn draw(
            &mut self,
            _scene: &Scene,
            camera: &Camera,
            nav: &NavBar,
        ) -> Result<(), StageError> {
            self.draws += 1;
            self.last_nav_offset = Some(nav.offset_percent);
            self.last_eye = Some(camera.eye);
            Ok(())
        }
    }

    pub(crate) fn stage_with(options: Options) -> (Stage<MockRenderer>, Instant) {
        let now = Instant::now();
        let stage = Stage::new(
            MockRenderer::default(),
            ViewportSize::new(1280, 720),
            options,
            now,
        );
        (stage, now)
    }

    fn wrapped_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn construction_sizes_renderer_and_starts_intro() {
        let (stage, _) = stage_with(Options::default());
        assert_eq!(stage.renderer().sizes, vec![(1280, 720)]);
        assert_eq!(stage.renderer().pixel_ratio, Some(2.0));
        assert!(stage.intro().is_running());
        assert_eq!(stage.scene().transform(stage.sphere()).unwrap().scale, Vec3::ZERO);
        assert_eq!(stage.nav().offset_percent, -100.0);
        assert_eq!(stage.camera().eye, Vec3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn plane_sits_under_sphere() {
        let (stage, _) = stage_with(Options::default());
        assert_eq!(stage.scene().transform(stage.plane()).unwrap().position.y, -3.0);
    }

    #[test]
    fn resize_sets_exact_aspect_and_renderer_size() {
        let (mut stage, _) = stage_with(Options::default());
        for (w, h) in [(1920, 1080), (333, 777), (1, 4096)] {
            stage.on_resize(w, h);
            assert_eq!(stage.camera().aspect, w as f32 / h as f32);
            assert_eq!(stage.renderer().sizes.last(), Some(&(w, h)));
            assert_eq!(stage.viewport(), ViewportSize::new(w, h));
        }
    }

    #[test]
    fn resize_refreshes_projection() {
        let (mut stage, _) = stage_with(Options::default());
        let before = stage.camera().projection();
        stage.on_resize(640, 640);
        assert_ne!(stage.camera().projection(), before);
        assert!((stage.camera().projection().x_axis.x - stage.camera().projection().y_axis.y).abs() < 1e-6);
    }

    #[test]
    fn zero_height_resize_is_accepted() {
        let (mut stage, _) = stage_with(Options::default());
        stage.on_resize(800, 0);
        assert!(!stage.camera().aspect.is_finite());
        assert_eq!(stage.renderer().sizes.last(), Some(&(800, 0)));
    }

    #[test]
    fn pan_and_zoom_leave_camera_alone() {
        let (mut stage, t0) = stage_with(Options {
            controls: ControlsOptions {
                auto_rotate: false,
                ..ControlsOptions::default()
            },
            ..Options::default()
        });
        stage.advance(t0);
        let eye = stage.camera().eye;

        let _ = stage.handle_input(InputEvent::ModifiersChanged { shift: true });
        for magnitude in [0.5_f32, 40.0, 1.0e4, 1.0e9] {
            let _ = stage.handle_input(InputEvent::Scroll { delta: magnitude });
            let _ = stage.handle_input(InputEvent::Scroll { delta: -magnitude });
            let _ = stage.handle_input(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
            let _ = stage.handle_input(InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            });
            let _ = stage.handle_input(InputEvent::CursorMoved {
                x: magnitude,
                y: magnitude,
            });
            let _ = stage.handle_input(InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            });
            for _ in 0..5 {
                stage.advance(t0);
            }
            assert_eq!(stage.controller().distance(), 20.0);
            assert_eq!(stage.camera().target, Vec3::ZERO);
            assert!((stage.camera().eye - eye).length() < 1e-4);
        }
    }

    #[test]
    fn idle_orbit_advances_by_fixed_rate() {
        let (mut stage, t0) = stage_with(Options::default());
        let start = stage.controller().azimuth();
        let rate = stage.controller().auto_rotate_angle();
        for n in 1..=720_u32 {
            stage.advance(t0 + Duration::from_millis(u64::from(n) * 16));
        }
        let expected = start - 720.0 * rate;
        assert!(wrapped_diff(stage.controller().azimuth(), expected) < 1e-3);
        // 720 frames at speed 5 is exactly one full turn.
        assert!(wrapped_diff(stage.controller().azimuth(), start) < 1e-3);
        assert!((stage.controller().polar() - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn intro_finishes_at_rest() {
        let (mut stage, t0) = stage_with(Options::default());
        let mut last = (0.0, -100.0);
        for ms in (0..=1200).step_by(16) {
            stage.advance(t0 + Duration::from_millis(ms));
            let scale = stage.scene().transform(stage.sphere()).unwrap().scale.x;
            let offset = stage.nav().offset_percent;
            assert!(scale >= last.0 && offset >= last.1);
            last = (scale, offset);
        }
        assert!(stage.intro().is_finished());
        assert_eq!(stage.scene().transform(stage.sphere()).unwrap().scale, Vec3::ONE);
        assert_eq!(stage.nav().offset_percent, 0.0);
    }

    #[test]
    fn disabled_intro_starts_at_rest() {
        let mut options = Options::default();
        options.intro.enabled = false;
        let (stage, _) = stage_with(options);
        assert!(!stage.intro().is_running());
        assert_eq!(stage.scene().transform(stage.sphere()).unwrap().scale, Vec3::ONE);
        assert_eq!(stage.nav().offset_percent, 0.0);
    }

    #[test]
    fn draw_hands_state_to_renderer() {
        let (mut stage, t0) = stage_with(Options::default());
        stage.advance(t0 + Duration::from_millis(500));
        stage.draw().unwrap();
        let renderer = stage.renderer();
        assert_eq!(renderer.draws, 1);
        assert_eq!(renderer.last_nav_offset, Some(stage.nav().offset_percent));
        assert_eq!(renderer.last_eye, Some(stage.camera().eye));
    }

    #[test]
    fn frame_driver_ticks_stage_until_cancelled() {
        struct Noop;
        impl RefreshScheduler for Noop {
            fn request_refresh(&self) {}
        }

        let (mut stage, t0) = stage_with(Options::default());
        let mut driver = FrameDriver::new();
        for i in 0..10 {
            let _ = driver.on_refresh(&mut stage, &Noop, t0 + Duration::from_millis(i * 16));
        }
        driver.cancel_token().cancel();
        let _ = driver.on_refresh(&mut stage, &Noop, t0);
        assert_eq!(driver.frames(), 10);
        assert_eq!(stage.renderer().draws, 10);
    }

    #[test]
    fn fixed_step_loop_drives_stage() {
        let (mut stage, _) = stage_with(Options::default());
        let frames = FixedStepLoop::new(Duration::ZERO)
            .with_max_frames(30)
            .run(&mut stage);
        assert_eq!(frames, 30);
        assert_eq!(stage.renderer().draws, 30);
    }

    #[test]
    fn quit_key_only_sets_flag() {
        let (mut stage, _) = stage_with(Options::default());
        KeyAction::Quit.execute(&mut stage);
        assert!(stage.quit_requested());
    }
}
