use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::input::{InputEvent, MouseButton};
use crate::options::ControlsOptions;

/// Keeps the polar angle off the poles so `look_at` never sees a
/// degenerate up vector.
const POLAR_EPSILON: f32 = 1e-6;

/// Scroll-wheel zoom step before `zoom_speed` scaling.
const ZOOM_STEP: f32 = 0.95;

/// Orbit position around a target, three.js-style: `theta` is the azimuth
/// about +Y measured from +Z, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

/// Wrap an angle into `[-π, π)`.
fn wrap_angle(angle: f32) -> f32 {
    angle - TAU * ((angle + PI) / TAU).floor()
}

/// Orbit camera controller: pointer-drag rotation with optional damping,
/// turntable auto-rotation, and (when enabled) pan and zoom.
///
/// Input only accumulates pending motion; [`advance`](Self::advance) applies
/// it to the camera once per frame.
pub struct OrbitController {
    target: Vec3,
    spherical: Spherical,
    home: (Vec3, Spherical),

    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_zoom: f32,

    mouse_pressed: bool,
    shift_pressed: bool,
    last_pointer: Option<Vec2>,
    viewport_height: f32,
    fovy: f32,

    opts: ControlsOptions,
}

impl OrbitController {
    /// Take over `camera`, orbiting around its current target.
    pub fn new(camera: &Camera, opts: ControlsOptions, viewport_height: u32) -> Self {
        let spherical = Spherical::from_offset(camera.eye - camera.target);
        Self {
            target: camera.target,
            spherical,
            home: (camera.target, spherical),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_zoom: 1.0,
            mouse_pressed: false,
            shift_pressed: false,
            last_pointer: None,
            viewport_height: viewport_height as f32,
            fovy: camera.fovy,
            opts,
        }
    }

    /// Per-frame turntable step in radians.
    pub fn auto_rotate_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.opts.auto_rotate_speed
    }

    /// Apply one frame of motion to `camera`.
    ///
    /// Auto-rotation is applied directly (not damped) while the user is not
    /// dragging, so an idle camera turns by exactly
    /// [`auto_rotate_angle`](Self::auto_rotate_angle) per call.
    pub fn advance(&mut self, camera: &mut Camera) {
        if self.opts.auto_rotate && !self.mouse_pressed {
            self.spherical.theta -= self.auto_rotate_angle();
        }

        let factor = if self.opts.enable_damping {
            self.opts.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.spherical.theta =
            wrap_angle(self.spherical.theta + self.pending_theta * factor);
        self.spherical.phi = (self.spherical.phi + self.pending_phi * factor)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        if self.pending_zoom != 1.0 {
            self.spherical.radius = (self.spherical.radius * self.pending_zoom)
                .clamp(self.opts.min_distance, self.opts.max_distance);
            self.pending_zoom = 1.0;
        }

        self.target += self.pending_pan * factor;

        camera.eye = self.target + self.spherical.to_offset();
        camera.target = self.target;
        camera.up = Vec3::Y;

        if self.opts.enable_damping {
            let keep = 1.0 - factor;
            self.pending_theta *= keep;
            self.pending_phi *= keep;
            self.pending_pan *= keep;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pending_pan = Vec3::ZERO;
        }
    }

    /// Feed a pointer/modifier event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.mouse_pressed = pressed;
                true
            }
            InputEvent::MouseButton { .. } => false,
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                false
            }
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                let delta = self.last_pointer.map(|last| current - last);
                self.last_pointer = Some(current);

                match delta {
                    Some(delta) if self.mouse_pressed => {
                        if self.shift_pressed {
                            self.pan(delta);
                        } else {
                            self.rotate(delta);
                        }
                        true
                    }
                    _ => false,
                }
            }
            InputEvent::Scroll { delta } => self.zoom(delta),
        }
    }

    /// Queue an orbit rotation from a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let height = self.viewport_height.max(1.0);
        let scale = TAU / height * self.opts.rotate_speed;
        self.pending_theta -= delta.x * scale;
        self.pending_phi -= delta.y * scale;
    }

    /// Queue a screen-space pan from a pointer delta in pixels. Ignored
    /// unless panning is enabled.
    pub fn pan(&mut self, delta: Vec2) {
        if !self.opts.enable_pan {
            log::trace!("pan ignored: disabled");
            return;
        }
        let offset = self.spherical.to_offset();
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);

        // Pixels → world units at the target's depth.
        let height = self.viewport_height.max(1.0);
        let world_per_px = 2.0 * offset.length() * (self.fovy.to_radians() / 2.0).tan() / height;
        self.pending_pan += (right * -delta.x + up * delta.y) * world_per_px * self.opts.pan_speed;
    }

    /// Queue a zoom step (positive = closer). Ignored unless zoom is
    /// enabled. Returns whether the zoom was accepted.
    pub fn zoom(&mut self, delta: f32) -> bool {
        if !self.opts.enable_zoom {
            log::trace!("zoom ignored: disabled");
            return false;
        }
        self.pending_zoom *= ZOOM_STEP.powf(self.opts.zoom_speed * delta);
        true
    }

    /// Viewport height used to scale drag distances.
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height as f32;
    }

    /// Vertical field of view (degrees) used to scale pan distances.
    pub fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
    }

    /// Field of view the pan scaling assumes, in degrees.
    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    /// Enable or disable the turntable rotation.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.opts.auto_rotate = enabled;
    }

    /// Flip the turntable rotation; returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.opts.auto_rotate = !self.opts.auto_rotate;
        log::debug!("auto-rotate: {}", self.opts.auto_rotate);
        self.opts.auto_rotate
    }

    /// Return to the initial orbit and drop pending motion. Takes effect on
    /// the next [`advance`](Self::advance).
    pub fn reset(&mut self) {
        (self.target, self.spherical) = self.home;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.pending_zoom = 1.0;
    }

    /// Whether the primary button is held.
    pub fn is_dragging(&self) -> bool {
        self.mouse_pressed
    }

    /// Current azimuth in radians, in `[-π, π)` after the first advance.
    pub fn azimuth(&self) -> f32 {
        self.spherical.theta
    }

    /// Current polar angle from +Y in radians.
    pub fn polar(&self) -> f32 {
        self.spherical.phi
    }

    /// Current orbit radius.
    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Current orbit target.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Active control options.
    pub fn options(&self) -> &ControlsOptions {
        &self.opts
    }

    /// Replace the control options, keeping the current orbit. Pending zoom
    /// or pan is dropped if the new options disable it.
    pub fn set_options(&mut self, opts: ControlsOptions) {
        if !opts.enable_zoom {
            self.pending_zoom = 1.0;
        }
        if !opts.enable_pan {
            self.pending_pan = Vec3::ZERO;
        }
        self.opts = opts;
    }
}
