//! Output size tracking.

/// Output size in physical pixels, updated on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Size from width and height.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Infinite or NaN when the height is zero.
    #[must_use]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Whether either dimension is zero (minimized window).
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(feature = "viewer")]
impl From<winit::dpi::PhysicalSize<u32>> for ViewportSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(ViewportSize::new(1920, 1080).aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn zero_height_is_degenerate_not_a_panic() {
        let size = ViewportSize::new(800, 0);
        assert!(size.is_zero());
        assert!(!size.aspect().is_finite());
        assert!(ViewportSize::new(0, 0).aspect().is_nan());
    }
}
