use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sphere_stage::animation::{
    intro_timeline, Position, SceneTargets, Timeline, Tween, TweenSink,
    TweenTarget, TweenValue,
};
use sphere_stage::nav::NavBar;
use sphere_stage::options::{
    DisplayOptions, IntroOptions, LightingOptions, SceneOptions,
};
use sphere_stage::scene::DemoScene;
use sphere_stage::util::easing::EasingFunction;
use web_time::{Duration, Instant};

struct Discard;

impl TweenSink for Discard {
    fn apply(&mut self, target: TweenTarget, value: TweenValue) {
        let _ = black_box((target, value));
    }
}

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuadraticOut;
    c.bench_function("quadratic_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn timeline_seek_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_seek");

    for count in [2, 16, 128] {
        let mut timeline = Timeline::new();
        for _ in 0..count {
            let _ = timeline.push(
                Tween::new(
                    TweenTarget::NavOffset,
                    -100.0_f32,
                    0.0_f32,
                    Duration::from_millis(300),
                ),
                Position::WithPrevious,
            );
        }

        group.bench_function(format!("{count}_tweens"), |b| {
            b.iter(|| {
                timeline.seek(black_box(Duration::from_millis(150)), &mut Discard);
            });
        });
    }
    group.finish();
}

fn intro_update_benchmark(c: &mut Criterion) {
    let mut demo = DemoScene::assemble(
        &SceneOptions::default(),
        &LightingOptions::default(),
    );
    let mut nav = NavBar::from_options(&DisplayOptions::default());
    let mut timeline = intro_timeline(&IntroOptions::default(), demo.sphere);
    let t0 = Instant::now();
    timeline.start(
        t0,
        &mut SceneTargets {
            scene: &mut demo.scene,
            nav: &mut nav,
        },
    );
    let mid = t0 + Duration::from_millis(500);

    c.bench_function("intro_update", |b| {
        b.iter(|| {
            black_box(timeline.update(
                black_box(mid),
                &mut SceneTargets {
                    scene: &mut demo.scene,
                    nav: &mut nav,
                },
            ))
        });
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    timeline_seek_benchmark,
    intro_update_benchmark
);
criterion_main!(benches);
