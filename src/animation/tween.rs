use glam::Vec3;
use web_time::Duration;

use crate::scene::NodeId;
use crate::util::easing::EasingFunction;

/// Property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// A scene node's scale.
    Scale(NodeId),
    /// The nav bar's vertical offset, in percent of its height.
    NavOffset,
}

/// An interpolated property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    /// Single number.
    Scalar(f32),
    /// Three-component vector.
    Vec3(Vec3),
}

impl TweenValue {
    /// Linear blend toward `to`. Mismatched kinds snap to `to` once `t`
    /// reaches 1 and hold `self` before that.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Vec3(a), Self::Vec3(b)) => Self::Vec3(a.lerp(b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }

    /// The value as a scalar (x component for vectors).
    #[must_use]
    pub fn as_scalar(self) -> f32 {
        match self {
            Self::Scalar(v) => v,
            Self::Vec3(v) => v.x,
        }
    }

    /// The value as a vector (splatted for scalars).
    #[must_use]
    pub fn as_vec3(self) -> Vec3 {
        match self {
            Self::Scalar(v) => Vec3::splat(v),
            Self::Vec3(v) => v,
        }
    }
}

impl From<f32> for TweenValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for TweenValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

/// A from/to interpolation of one property, placed on a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Driven property.
    pub target: TweenTarget,
    /// Value before and at the start offset.
    pub from: TweenValue,
    /// Value at and after the end.
    pub to: TweenValue,
    /// Offset from the timeline start. Set when added to a timeline.
    pub start: Duration,
    /// Length of the interpolation.
    pub duration: Duration,
    /// Progress curve.
    pub easing: EasingFunction,
}

impl Tween {
    /// Tween with the default easing, starting at offset zero.
    pub fn new(
        target: TweenTarget,
        from: impl Into<TweenValue>,
        to: impl Into<TweenValue>,
        duration: Duration,
    ) -> Self {
        Self {
            target,
            from: from.into(),
            to: to.into(),
            start: Duration::ZERO,
            duration,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Offset at which this tween reaches its `to` value.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Raw progress in `[0, 1]` at `elapsed` since the timeline start.
    #[inline]
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.start {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let local = elapsed - self.start;
        (local.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `elapsed` since the timeline start.
    #[inline]
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> TweenValue {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.evaluate(t))
    }
}
