//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera with a cached projection and an orbit
//! controller with damping and turntable auto-rotation.

/// Orbit controller translating pointer input into camera motion.
pub mod controller;
/// Core camera struct and projection.
pub mod core;

pub use controller::OrbitController;
pub use core::Camera;
