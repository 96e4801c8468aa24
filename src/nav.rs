//! Navigation bar overlay drawn along the top edge of the output.

use crate::options::DisplayOptions;
use crate::util::color::Color;

/// Top-edge bar whose vertical offset is a percentage of its own height.
///
/// An offset of `-100.0` puts the bar fully above the visible area; `0.0`
/// is its resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavBar {
    /// Bar height in physical pixels.
    pub height_px: f32,
    /// Vertical offset in percent of `height_px` (negative moves up).
    pub offset_percent: f32,
    /// Fill color.
    pub color: Color,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the overlay is drawn at all.
    pub visible: bool,
}

impl NavBar {
    /// Bar at rest, styled from display options.
    #[must_use]
    pub fn from_options(opts: &DisplayOptions) -> Self {
        Self {
            height_px: opts.nav_height.max(0.0),
            offset_percent: 0.0,
            color: opts.nav_color,
            opacity: opts.nav_opacity.clamp(0.0, 1.0),
            visible: opts.show_nav,
        }
    }

    /// Offset in pixels (negative is up).
    #[must_use]
    pub fn offset_px(&self) -> f32 {
        self.height_px * self.offset_percent / 100.0
    }

    /// Visible vertical span `(top, bottom)` in pixels from the top edge of
    /// the output, or `None` when nothing of the bar is on screen.
    #[must_use]
    pub fn visible_span(&self) -> Option<(f32, f32)> {
        if !self.visible || self.opacity <= 0.0 {
            return None;
        }
        let top = self.offset_px();
        let bottom = top + self.height_px;
        (bottom > 0.0).then_some((top.max(0.0), bottom))
    }
}
