use timeline_range::api::{RangeController, RangeControllerConfig, RangeOptions, RollingMode};
use timeline_range::core::{Clock, MILLIS_PER_DAY, ManualClock, Viewport};
use timeline_range::RangeError;

const NOW: f64 = 1_700_000_000_000.0;

#[test]
fn default_window_spans_six_days_around_todays_midnight() {
    let clock = ManualClock::new(NOW);
    let controller =
        RangeController::new(clock.clone(), RangeControllerConfig::default()).expect("controller");

    let midnight = clock.start_of_day(NOW);
    let window = controller.window();
    assert_eq!(window.start, midnight - 3.0 * MILLIS_PER_DAY);
    assert_eq!(window.end, midnight + 3.0 * MILLIS_PER_DAY);
    assert_eq!(window.span(), 6.0 * MILLIS_PER_DAY);
    assert_eq!(window.start.rem_euclid(MILLIS_PER_DAY), 0.0);
    assert_eq!(window.end.rem_euclid(MILLIS_PER_DAY), 0.0);
    assert!(window.contains(NOW));
}

#[test]
fn configured_window_is_constrained_without_scheduling_notifications() {
    let clock = ManualClock::new(NOW);
    let options = RangeOptions::default().with_bounds(Some(0.0), Some(50.0));
    let config = RangeControllerConfig::new(options)
        .with_window(10.0, 200.0)
        .with_viewport(Viewport::new(100.0, 40.0));
    let controller = RangeController::new(clock, config).expect("controller");

    let window = controller.window();
    assert_eq!((window.start, window.end), (0.0, 50.0));
    assert_eq!(controller.pending_timer_count(), 0);
    assert!(!controller.has_pending_settle());
}

#[test]
fn only_one_configured_bound_keeps_the_default_for_the_other() {
    let clock = ManualClock::new(NOW);
    let mut config = RangeControllerConfig::default();
    config.end = Some(NOW + MILLIS_PER_DAY * 10.0);
    let controller = RangeController::new(clock.clone(), config).expect("controller");

    let midnight = clock.start_of_day(NOW);
    assert_eq!(controller.window().start, midnight - 3.0 * MILLIS_PER_DAY);
    assert_eq!(controller.window().end, NOW + MILLIS_PER_DAY * 10.0);
}

#[test]
fn invalid_initial_options_are_rejected() {
    let clock = ManualClock::new(NOW);
    let options = RangeOptions::default().with_rolling_mode(RollingMode {
        follow: false,
        offset: 1.5,
    });
    let err = RangeController::new(clock, RangeControllerConfig::new(options))
        .err()
        .expect("offset outside unit interval must fail");
    assert!(matches!(err, RangeError::InvalidOptions(_)));
}

#[test]
fn non_finite_initial_window_is_rejected() {
    let clock = ManualClock::new(NOW);
    let config = RangeControllerConfig::default().with_window(f64::NAN, 10.0);
    let err = RangeController::new(clock, config)
        .err()
        .expect("nan start must fail");
    assert!(matches!(err, RangeError::InvalidRange { .. }));
}

#[test]
fn milliseconds_per_pixel_tracks_window_and_viewport() {
    let clock = ManualClock::new(NOW);
    let config = RangeControllerConfig::default()
        .with_window(0.0, 100.0)
        .with_viewport(Viewport::new(100.0, 40.0));
    let mut controller = RangeController::new(clock, config).expect("controller");

    assert_eq!(controller.milliseconds_per_pixel(), 1.0);
    controller.set_viewport(Viewport::new(50.0, 40.0));
    assert_eq!(controller.milliseconds_per_pixel(), 2.0);
    controller
        .set_range(Some(0.0), Some(200.0), Default::default())
        .expect("set range");
    assert_eq!(controller.milliseconds_per_pixel(), 4.0);
}

#[test]
fn conversion_follows_the_current_window() {
    let clock = ManualClock::new(NOW);
    let config = RangeControllerConfig::default().with_window(100.0, 300.0);
    let controller = RangeController::new(clock, config).expect("controller");

    let conversion = controller.conversion(400.0);
    assert_eq!(conversion.offset, 100.0);
    assert_eq!(conversion.scale, 2.0);

    let with_hidden = controller.conversion_with_hidden(400.0, 100.0);
    assert_eq!(with_hidden.scale, 4.0);
}
