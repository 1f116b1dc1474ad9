use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_range::api::{RangeController, RangeControllerConfig, RangeOptions, RangeRequest};
use timeline_range::core::{
    HiddenInterval, ManualClock, PixelConversion, StaticHiddenIntervals, TimeWindow, Viewport,
};
use timeline_range::interaction::{GestureEvent, WheelEvent};

const NOW: f64 = 1_700_000_000_000.0;

fn bench_pixel_conversion_round_trip(c: &mut Criterion) {
    let window = TimeWindow::new(NOW - 86_400_000.0, NOW + 86_400_000.0);

    c.bench_function("pixel_conversion_round_trip", |b| {
        b.iter(|| {
            let conversion = PixelConversion::to_pixel_space(black_box(window), 1920.0, 0.0);
            let time = conversion.pixel_to_time(black_box(1_234.5));
            let _ = conversion.time_to_pixel(time);
        })
    });
}

fn bench_constrained_set_range(c: &mut Criterion) {
    let options = RangeOptions::default().with_bounds(Some(NOW - 1e9), Some(NOW + 1e9));
    let config = RangeControllerConfig::new(options)
        .with_window(NOW - 1_000.0, NOW + 1_000.0)
        .with_viewport(Viewport::new(1920.0, 1080.0));
    let mut controller =
        RangeController::new(ManualClock::new(NOW), config).expect("controller init");

    let mut shift = 0.0;
    c.bench_function("constrained_set_range", |b| {
        b.iter(|| {
            shift = (shift + 7.0) % 1_000.0;
            controller
                .set_range(
                    Some(black_box(NOW - 1_000.0 + shift)),
                    Some(black_box(NOW + 1_000.0 + shift)),
                    RangeRequest::default(),
                )
                .expect("set range should succeed");
        })
    });
}

fn bench_hidden_aware_drag_and_wheel(c: &mut Criterion) {
    let hidden: Vec<HiddenInterval> = (0..64)
        .map(|i| {
            let start = NOW - 32_000.0 + f64::from(i) * 1_000.0;
            HiddenInterval::new(start, start + 200.0)
        })
        .collect();
    let config = RangeControllerConfig::new(RangeOptions::default())
        .with_window(NOW - 10_000.0, NOW + 10_000.0)
        .with_viewport(Viewport::new(1920.0, 1080.0));
    let mut controller = RangeController::new(ManualClock::new(NOW), config)
        .expect("controller init")
        .with_hidden_dates(StaticHiddenIntervals::new(hidden));

    let grab = GestureEvent::at(960.0, 200.0);
    controller.touch(grab);
    controller.drag_start(grab);

    let mut delta = 0.0;
    c.bench_function("hidden_aware_drag", |b| {
        b.iter(|| {
            delta = (delta + 3.0) % 300.0;
            controller
                .drag(GestureEvent::at(960.0 + delta, 200.0).with_delta(black_box(delta), 0.0))
                .expect("drag should succeed");
        })
    });
    controller.drag_end(grab);

    let mut notch = 1.0;
    c.bench_function("wheel_zoom_step", |b| {
        b.iter(|| {
            notch = -notch;
            let _ = controller
                .wheel(WheelEvent::at(960.0, 200.0).with_delta_y(black_box(notch * 3.0)))
                .expect("wheel should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_pixel_conversion_round_trip,
    bench_constrained_set_range,
    bench_hidden_aware_drag_and_wheel
);
criterion_main!(benches);
