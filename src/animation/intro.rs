use glam::Vec3;
use web_time::Duration;

use super::timeline::{Position, Timeline, TweenSink};
use super::tween::{Tween, TweenTarget, TweenValue};
use crate::nav::NavBar;
use crate::options::{IntroOptions, Sequencing};
use crate::scene::{NodeId, Scene};

/// Nav offset at which the bar sits fully above the output.
pub const NAV_HIDDEN_PERCENT: f32 = -100.0;

/// Longest accepted intro tween, matching the options schema range.
pub const MAX_INTRO_SECS: f32 = 5.0;

/// Per-tween duration from options. Out-of-range values are clamped to
/// `[0, MAX_INTRO_SECS]`; NaN falls back to the default.
fn intro_duration(secs: f32) -> Duration {
    let secs = if secs.is_nan() {
        let fallback = IntroOptions::default().duration_secs;
        log::warn!("intro duration is NaN, using {fallback}s");
        fallback
    } else if !(0.0..=MAX_INTRO_SECS).contains(&secs) {
        let clamped = secs.clamp(0.0, MAX_INTRO_SECS);
        log::warn!("intro duration {secs}s out of range, using {clamped}s");
        clamped
    } else {
        secs
    };
    Duration::from_secs_f32(secs)
}

/// Build the startup timeline: `sphere` scales in from zero while the nav
/// bar slides down from fully hidden to its resting place.
#[must_use]
pub fn intro_timeline(opts: &IntroOptions, sphere: NodeId) -> Timeline {
    let duration = intro_duration(opts.duration_secs);
    let position = match opts.sequencing {
        Sequencing::Concurrent => Position::WithPrevious,
        Sequencing::Sequential => Position::AfterPrevious,
    };

    let mut timeline = Timeline::new();
    let _ = timeline
        .push(
            Tween::new(TweenTarget::Scale(sphere), Vec3::ZERO, Vec3::ONE, duration)
                .with_easing(opts.easing),
            Position::WithPrevious,
        )
        .push(
            Tween::new(TweenTarget::NavOffset, NAV_HIDDEN_PERCENT, 0.0_f32, duration)
                .with_easing(opts.easing),
            position,
        );
    timeline
}

/// Writes tween values into the scene and nav bar.
pub struct SceneTargets<'a> {
    /// Scene whose node transforms are driven.
    pub scene: &'a mut Scene,
    /// Nav bar whose offset is driven.
    pub nav: &'a mut NavBar,
}

impl TweenSink for SceneTargets<'_> {
    fn apply(&mut self, target: TweenTarget, value: TweenValue) {
        match target {
            TweenTarget::Scale(id) => match self.scene.transform_mut(id) {
                Some(transform) => transform.scale = value.as_vec3(),
                None => log::warn!("tween target node {} missing", id.index()),
            },
            TweenTarget::NavOffset => self.nav.offset_percent = value.as_scalar(),
        }
    }
}

#[cfg(test)]
mod tests {
    use web_time::Instant;

    use super::*;
    use crate::options::{DisplayOptions, LightingOptions, SceneOptions};
    use crate::scene::DemoScene;

    fn demo() -> (DemoScene, NavBar) {
        (
            DemoScene::assemble(&SceneOptions::default(), &LightingOptions::default()),
            NavBar::from_options(&DisplayOptions::default()),
        )
    }

    #[test]
    fn intro_runs_from_hidden_to_rest_monotonically() {
        let (mut demo, mut nav) = demo();
        let mut timeline = intro_timeline(&IntroOptions::default(), demo.sphere);
        let t0 = Instant::now();

        timeline.start(
            t0,
            &mut SceneTargets {
                scene: &mut demo.scene,
                nav: &mut nav,
            },
        );
        assert_eq!(demo.scene.transform(demo.sphere).unwrap().scale, Vec3::ZERO);
        assert_eq!(nav.offset_percent, -100.0);

        let mut last_scale = 0.0;
        let mut last_offset = -100.0;
        for ms in (0..=1100).step_by(10) {
            let _ = timeline.update(
                t0 + Duration::from_millis(ms),
                &mut SceneTargets {
                    scene: &mut demo.scene,
                    nav: &mut nav,
                },
            );
            let scale = demo.scene.transform(demo.sphere).unwrap().scale;
            assert_eq!(scale.x, scale.y);
            assert_eq!(scale.y, scale.z);
            assert!(scale.x >= last_scale, "scale went back at {ms}ms");
            assert!(nav.offset_percent >= last_offset, "nav went back at {ms}ms");
            last_scale = scale.x;
            last_offset = nav.offset_percent;
        }

        assert!(timeline.is_finished());
        assert_eq!(demo.scene.transform(demo.sphere).unwrap().scale, Vec3::ONE);
        assert_eq!(nav.offset_percent, 0.0);
    }

    #[test]
    fn concurrent_by_default_sequential_on_request() {
        let sphere = demo().0.sphere;
        let concurrent = intro_timeline(&IntroOptions::default(), sphere);
        assert_eq!(concurrent.tweens()[1].start, Duration::ZERO);
        assert_eq!(concurrent.duration(), Duration::from_secs(1));

        let sequential = intro_timeline(
            &IntroOptions {
                sequencing: Sequencing::Sequential,
                ..IntroOptions::default()
            },
            sphere,
        );
        assert_eq!(sequential.tweens()[1].start, Duration::from_secs(1));
        assert_eq!(sequential.duration(), Duration::from_secs(2));
    }

    #[test]
    fn out_of_range_duration_from_config_is_clamped() {
        let sphere = demo().0.sphere;
        for (value, expected) in [
            ("inf", Duration::from_secs(5)),
            ("1e30", Duration::from_secs(5)),
            ("-inf", Duration::ZERO),
            ("-2.0", Duration::ZERO),
            ("nan", Duration::from_secs(1)),
        ] {
            let opts = crate::options::Options::from_toml(&format!(
                "[intro]\nduration_secs = {value}\n"
            ))
            .unwrap();
            let timeline = intro_timeline(&opts.intro, sphere);
            assert_eq!(timeline.tweens()[0].duration, expected, "{value}");
            assert_eq!(timeline.duration(), expected, "{value}");
        }
    }

    #[test]
    fn sequential_nav_holds_hidden_until_its_turn() {
        let (mut demo, mut nav) = demo();
        let mut timeline = intro_timeline(
            &IntroOptions {
                sequencing: Sequencing::Sequential,
                ..IntroOptions::default()
            },
            demo.sphere,
        );
        let t0 = Instant::now();
        let mut targets = SceneTargets {
            scene: &mut demo.scene,
            nav: &mut nav,
        };
        timeline.start(t0, &mut targets);
        let _ = timeline.update(t0 + Duration::from_millis(600), &mut targets);
        assert_eq!(nav.offset_percent, -100.0);
        assert!(demo.scene.transform(demo.sphere).unwrap().scale.x > 0.0);
    }
}
