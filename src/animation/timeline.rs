//! One-shot tween timeline.
//!
//! Tweens are placed relative to the previously added tween and played
//! against a start instant. A timeline runs once: after its last tween ends
//! it stops writing to its targets and cannot be restarted.

use web_time::{Duration, Instant};

use super::tween::{Tween, TweenTarget, TweenValue};

/// Receives interpolated values from a running timeline.
pub trait TweenSink {
    /// Write `value` to `target`.
    fn apply(&mut self, target: TweenTarget, value: TweenValue);
}

/// Where a tween is placed relative to the previously added one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Same start offset as the previous tween (zero for the first).
    WithPrevious,
    /// Starts when the previous tween ends.
    #[default]
    AfterPrevious,
    /// Absolute offset from the timeline start.
    At(Duration),
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Built but not started.
    Idle,
    /// Playing since the given instant.
    Running {
        /// When playback began.
        started: Instant,
    },
    /// Every tween reached its end.
    Finished,
}

/// Ordered tweens played once from a start instant.
#[derive(Debug, Clone)]
pub struct Timeline {
    tweens: Vec<Tween>,
    state: TimelineState,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Empty, idle timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            state: TimelineState::Idle,
        }
    }

    /// Append a tween at `position`. Ignored once the timeline has started.
    pub fn push(&mut self, mut tween: Tween, position: Position) -> &mut Self {
        if self.state != TimelineState::Idle {
            log::warn!("timeline: tween added after start, ignored");
            return self;
        }
        let previous = self.tweens.last();
        tween.start = match position {
            Position::WithPrevious => previous.map_or(Duration::ZERO, |p| p.start),
            Position::AfterPrevious => previous.map_or(Duration::ZERO, Tween::end),
            Position::At(offset) => offset,
        };
        self.tweens.push(tween);
        self
    }

    /// Total length: the latest tween end.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.tweens
            .iter()
            .map(Tween::end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Begin playback at `now` and immediately write every from-value.
    /// Ignored unless the timeline is idle.
    pub fn start(&mut self, now: Instant, sink: &mut impl TweenSink) {
        if self.state != TimelineState::Idle {
            log::debug!("timeline: start ignored in state {:?}", self.state);
            return;
        }
        self.state = TimelineState::Running { started: now };
        log::debug!(
            "timeline: started {} tweens over {:?}",
            self.tweens.len(),
            self.duration()
        );
        self.seek(Duration::ZERO, sink);
    }

    /// Write the values for `now`. Returns whether the timeline is still
    /// running afterwards. Idle and finished timelines write nothing.
    pub fn update(&mut self, now: Instant, sink: &mut impl TweenSink) -> bool {
        let TimelineState::Running { started } = self.state else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started);
        self.seek(elapsed, sink);
        if elapsed >= self.duration() {
            self.state = TimelineState::Finished;
            log::debug!("timeline: finished");
            return false;
        }
        true
    }

    /// Write the values at `elapsed` since start, regardless of state.
    pub fn seek(&self, elapsed: Duration, sink: &mut impl TweenSink) {
        for tween in &self.tweens {
            sink.apply(tween.target, tween.value_at(elapsed));
        }
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Whether playback has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == TimelineState::Finished
    }

    /// Whether playback is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimelineState::Running { .. })
    }

    /// The placed tweens.
    #[must_use]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<(TweenTarget, TweenValue)>,
    }

    impl TweenSink for Recorder {
        fn apply(&mut self, target: TweenTarget, value: TweenValue) {
            self.writes.push((target, value));
        }
    }

    impl Recorder {
        fn last(&self, target: TweenTarget) -> Option<f32> {
            self.writes
                .iter()
                .rev()
                .find(|(t, _)| *t == target)
                .map(|(_, v)| v.as_scalar())
        }
    }

    fn tween(from: f32, to: f32, secs: f32) -> Tween {
        Tween::new(TweenTarget::NavOffset, from, to, Duration::from_secs_f32(secs))
    }

    #[test]
    fn positions_place_tweens() {
        let mut timeline = Timeline::new();
        let _ = timeline
            .push(tween(0.0, 1.0, 1.0), Position::WithPrevious)
            .push(tween(0.0, 1.0, 0.5), Position::WithPrevious)
            .push(tween(0.0, 1.0, 2.0), Position::AfterPrevious)
            .push(tween(0.0, 1.0, 0.1), Position::At(Duration::from_secs(5)));
        let starts: Vec<f32> = timeline
            .tweens()
            .iter()
            .map(|t| t.start.as_secs_f32())
            .collect();
        assert_eq!(starts, vec![0.0, 0.0, 0.5, 5.0]);
        assert!((timeline.duration().as_secs_f32() - 5.1).abs() < 1e-6);
    }

    #[test]
    fn start_writes_from_values() {
        let mut timeline = Timeline::new();
        let _ = timeline.push(tween(-100.0, 0.0, 1.0), Position::WithPrevious);
        let mut sink = Recorder::default();
        timeline.start(Instant::now(), &mut sink);
        assert_eq!(sink.last(TweenTarget::NavOffset), Some(-100.0));
        assert!(timeline.is_running());
    }

    #[test]
    fn finishes_and_stops_writing() {
        let mut timeline = Timeline::new();
        let _ = timeline.push(tween(-100.0, 0.0, 1.0), Position::WithPrevious);
        let mut sink = Recorder::default();
        let t0 = Instant::now();
        timeline.start(t0, &mut sink);

        assert!(timeline.update(t0 + Duration::from_millis(500), &mut sink));
        assert!(!timeline.update(t0 + Duration::from_secs(1), &mut sink));
        assert!(timeline.is_finished());
        assert_eq!(sink.last(TweenTarget::NavOffset), Some(0.0));

        let writes = sink.writes.len();
        assert!(!timeline.update(t0 + Duration::from_secs(2), &mut sink));
        assert_eq!(sink.writes.len(), writes);
    }

    #[test]
    fn cannot_restart() {
        let mut timeline = Timeline::new();
        let _ = timeline.push(tween(0.0, 1.0, 0.1), Position::WithPrevious);
        let mut sink = Recorder::default();
        let t0 = Instant::now();
        timeline.start(t0, &mut sink);
        let _ = timeline.update(t0 + Duration::from_secs(1), &mut sink);
        let writes = sink.writes.len();

        timeline.start(t0 + Duration::from_secs(2), &mut sink);
        assert!(timeline.is_finished());
        assert_eq!(sink.writes.len(), writes);
    }

    #[test]
    fn update_before_start_is_inert() {
        let mut timeline = Timeline::new();
        let _ = timeline.push(tween(0.0, 1.0, 1.0), Position::WithPrevious);
        let mut sink = Recorder::default();
        assert!(!timeline.update(Instant::now(), &mut sink));
        assert!(sink.writes.is_empty());
        assert_eq!(timeline.state(), TimelineState::Idle);
    }

    #[test]
    fn push_after_start_is_ignored() {
        let mut timeline = Timeline::new();
        let mut sink = Recorder::default();
        timeline.start(Instant::now(), &mut sink);
        let _ = timeline.push(tween(0.0, 1.0, 1.0), Position::WithPrevious);
        assert!(timeline.tweens().is_empty());
    }
}
