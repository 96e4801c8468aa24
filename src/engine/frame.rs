//! Per-frame driving.
//!
//! A [`FrameDriver`] is ticked by whatever delivers display refreshes (the
//! winit redraw event in the viewer). Each tick advances the target, draws
//! it and asks the [`RefreshScheduler`] for the next refresh. Hosts without
//! a refresh source use [`FixedStepLoop`], which ticks the same driver on a
//! fixed timestep until cancelled.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use web_time::{Duration, Instant};

use crate::error::StageError;

/// Shared stop flag. Clones observe the same flag, so a token can be handed
/// to another thread or a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Delivers the next display refresh.
pub trait RefreshScheduler {
    /// Ask for one more refresh callback.
    fn request_refresh(&self);
}

#[cfg(feature = "viewer")]
impl RefreshScheduler for winit::window::Window {
    fn request_refresh(&self) {
        self.request_redraw();
    }
}

/// Something advanced and drawn once per refresh.
pub trait FrameTarget {
    /// Step simulation state to `now`.
    fn advance(&mut self, now: Instant);

    /// Draw the current state.
    fn draw(&mut self) -> Result<(), StageError>;
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The target was advanced and drawn and another refresh requested.
    Drawn,
    /// The driver is cancelled; nothing happened.
    Cancelled,
}

/// Repeating per-refresh task: advance, draw, request the next refresh.
#[derive(Debug, Default)]
pub struct FrameDriver {
    frames: u64,
    cancel: CancelToken,
}

impl FrameDriver {
    /// Driver with its own cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver stopped by `cancel`.
    #[must_use]
    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { frames: 0, cancel }
    }

    /// A handle that stops this driver.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Ticks that drew so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Request the first refresh.
    pub fn start<S: RefreshScheduler + ?Sized>(&self, scheduler: &S) {
        if !self.cancel.is_cancelled() {
            scheduler.request_refresh();
        }
    }

    /// One refresh callback.
    ///
    /// A draw error is returned after the next refresh has been requested,
    /// so a single failed frame does not stop the loop.
    pub fn on_refresh<T, S>(
        &mut self,
        target: &mut T,
        scheduler: &S,
        now: Instant,
    ) -> Result<Tick, StageError>
    where
        T: FrameTarget + ?Sized,
        S: RefreshScheduler + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return Ok(Tick::Cancelled);
        }
        self.frames += 1;
        target.advance(now);
        let drawn = target.draw();
        scheduler.request_refresh();
        log::trace!("frame {}", self.frames);
        drawn.map(|()| Tick::Drawn)
    }
}

/// Scheduler that just remembers whether a refresh was requested.
#[derive(Debug, Default)]
struct PendingRefresh(Cell<bool>);

impl PendingRefresh {
    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl RefreshScheduler for PendingRefresh {
    fn request_refresh(&self) {
        self.0.set(true);
    }
}

/// Fixed-timestep fallback for hosts with no refresh source.
#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    step: Duration,
    max_frames: Option<u64>,
    cancel: CancelToken,
}

impl FixedStepLoop {
    /// Tick every `step` (zero = as fast as possible).
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            max_frames: None,
            cancel: CancelToken::new(),
        }
    }

    /// Tick `fps` times per second; 0 means unthrottled.
    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        let step = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(fps))
        };
        Self::new(step)
    }

    /// Stop after `frames` ticks.
    #[must_use]
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Stop when `cancel` is set.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that stops this loop.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Tick `target` until cancelled or the frame limit is reached. Draw
    /// errors are logged and the loop carries on. Returns the number of
    /// frames drawn.
    pub fn run<T: FrameTarget + ?Sized>(&self, target: &mut T) -> u64 {
        let mut driver = FrameDriver::with_cancel(self.cancel.clone());
        let scheduler = PendingRefresh::default();
        driver.start(&scheduler);

        let mut next = Instant::now();
        while scheduler.take() {
            if self.max_frames.is_some_and(|max| driver.frames() >= max) {
                break;
            }
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            }
            let now = Instant::now();
            next = now + self.step;

            match driver.on_refresh(target, &scheduler, now) {
                Ok(Tick::Drawn) => {}
                Ok(Tick::Cancelled) => break,
                Err(e) => log::warn!("frame {} failed: {e}", driver.frames()),
            }
        }

        log::info!("fixed-step loop stopped after {} frames", driver.frames());
        driver.frames()
    }
}
