//! Shared utilities: colors, easing curves and frame timing.

pub mod color;
pub mod easing;
/// Smoothed FPS counter.
pub mod frame_timing;
