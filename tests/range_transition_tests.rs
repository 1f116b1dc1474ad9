use std::cell::{Cell, RefCell};
use std::rc::Rc;

use timeline_range::api::{RangeController, RangeControllerConfig, RangeOptions, RangeRequest};
use timeline_range::core::{HiddenInterval, ManualClock, StaticHiddenIntervals, TimeWindow, Viewport};
use timeline_range::extensions::{RangeEvent, RangeEventKind};
use timeline_range::RangeError;

const NOW: f64 = 1_700_000_000_000.0;

type EventLog = Rc<RefCell<Vec<RangeEvent>>>;

fn controller_with(
    options: RangeOptions,
    start: f64,
    end: f64,
) -> (ManualClock, RangeController<ManualClock>, EventLog) {
    let clock = ManualClock::new(NOW);
    let config = RangeControllerConfig::new(options)
        .with_window(start, end)
        .with_viewport(Viewport::new(100.0, 40.0));
    let mut controller = RangeController::new(clock.clone(), config).expect("controller");

    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        RangeEventKind::RangeChange,
        RangeEventKind::RangeChanged,
        RangeEventKind::CheckRangedItems,
        RangeEventKind::PanMove,
    ] {
        let sink = Rc::clone(&log);
        controller.on(kind, move |event: &RangeEvent| sink.borrow_mut().push(*event));
    }
    (clock, controller, log)
}

fn count(log: &EventLog, kind: RangeEventKind) -> usize {
    log.borrow().iter().filter(|event| event.kind() == kind).count()
}

#[test]
fn zero_width_request_expands_to_default_zoom_floor() {
    let (_clock, mut controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller
        .set_range(Some(40.0), Some(40.0), RangeRequest::default())
        .expect("set range");
    assert_eq!(controller.window(), TimeWindow::new(35.0, 45.0));
    assert_eq!(controller.window().span(), 10.0);
}

#[test]
fn inverted_request_collapses_instead_of_swapping() {
    let options = RangeOptions::default().with_zoom_limits(None, None);
    let (_clock, mut controller, _log) = controller_with(options, 0.0, 100.0);
    controller
        .set_range(Some(60.0), Some(40.0), RangeRequest::default())
        .expect("set range");
    assert_eq!(controller.window(), TimeWindow::new(60.0, 60.0));
}

#[test]
fn min_bound_shift_clamps_only_the_end_against_max() {
    let options = RangeOptions::default()
        .with_bounds(Some(0.0), Some(50.0))
        .with_zoom_limits(None, None);
    let (_clock, mut controller, _log) = controller_with(options, 10.0, 30.0);
    controller
        .set_range(Some(-20.0), Some(40.0), RangeRequest::default())
        .expect("set range");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 50.0));
}

#[test]
fn unspecified_bound_keeps_current_value() {
    let (_clock, mut controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller
        .set_range(None, Some(250.0), RangeRequest::default())
        .expect("set range");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 250.0));
}

#[test]
fn rapid_non_animated_requests_settle_once_after_the_last_one() {
    let (clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);

    controller
        .set_range(Some(10.0), Some(110.0), RangeRequest::default())
        .expect("first");
    clock.advance(100.0);
    controller
        .set_range(Some(20.0), Some(120.0), RangeRequest::default())
        .expect("second");

    clock.advance(150.0);
    controller.run_due_timers();
    assert_eq!(count(&log, RangeEventKind::RangeChange), 2);
    assert_eq!(count(&log, RangeEventKind::RangeChanged), 0);

    clock.advance(50.0);
    assert_eq!(controller.run_due_timers(), 1);
    assert_eq!(count(&log, RangeEventKind::RangeChanged), 1);

    let events = log.borrow();
    let settled = events.last().and_then(RangeEvent::change).expect("settled payload");
    assert_eq!((settled.start, settled.end), (20.0, 120.0));
    assert!(!settled.by_user);
}

#[test]
fn repeating_the_same_request_fires_no_additional_notification() {
    let (clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);

    for _ in 0..2 {
        controller
            .set_range(Some(10.0), Some(110.0), RangeRequest::default())
            .expect("set range");
    }
    assert_eq!(count(&log, RangeEventKind::RangeChange), 1);

    clock.advance(1_000.0);
    controller.run_due_timers();
    assert_eq!(count(&log, RangeEventKind::RangeChanged), 1);
    assert!(!controller.has_pending_settle());
}

#[test]
fn changing_precedes_settled_for_the_same_window() {
    let (clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller
        .set_range(Some(30.0), Some(130.0), RangeRequest::default())
        .expect("set range");
    clock.advance(200.0);
    controller.run_due_timers();

    let kinds: Vec<_> = log.borrow().iter().map(RangeEvent::kind).collect();
    assert_eq!(kinds, vec![RangeEventKind::RangeChange, RangeEventKind::RangeChanged]);
}

#[test]
fn disjoint_jump_requests_ranged_items_check_before_change() {
    let (_clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller
        .set_range(Some(500.0), Some(600.0), RangeRequest::default())
        .expect("set range");

    let kinds: Vec<_> = log.borrow().iter().map(RangeEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![RangeEventKind::CheckRangedItems, RangeEventKind::RangeChange]
    );

    controller
        .set_range(Some(550.0), Some(650.0), RangeRequest::default())
        .expect("overlapping set");
    assert_eq!(count(&log, RangeEventKind::CheckRangedItems), 1);
}

#[test]
fn non_finite_request_fails_and_leaves_state_untouched() {
    let (_clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    let err = controller
        .set_range(Some(f64::NAN), None, RangeRequest::default())
        .expect_err("nan must fail");
    assert!(matches!(err, RangeError::InvalidRange { .. }));

    let err = controller
        .set_range(None, Some(f64::INFINITY), RangeRequest::default())
        .expect_err("infinity must fail");
    assert!(matches!(err, RangeError::InvalidRange { .. }));

    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
    assert!(log.borrow().is_empty());
}

#[test]
fn completion_callback_runs_only_when_the_window_changed() {
    let (_clock, mut controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    let calls = Rc::new(Cell::new(0));

    let sink = Rc::clone(&calls);
    controller
        .set_range(
            Some(0.0),
            Some(100.0),
            RangeRequest::default().on_complete(move || sink.set(sink.get() + 1)),
        )
        .expect("unchanged set");
    assert_eq!(calls.get(), 0);

    let sink = Rc::clone(&calls);
    controller
        .set_range(
            Some(0.0),
            Some(120.0),
            RangeRequest::default().on_complete(move || sink.set(sink.get() + 1)),
        )
        .expect("changed set");
    assert_eq!(calls.get(), 1);
}

#[test]
fn move_by_shifts_by_span_fraction_without_notifications() {
    let (_clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller.move_by(0.5);
    assert_eq!(controller.window(), TimeWindow::new(50.0, 150.0));
    assert!(log.borrow().is_empty());
    assert_eq!(controller.pending_timer_count(), 0);
}

#[test]
fn move_by_skips_constraints() {
    let options = RangeOptions::default().with_bounds(Some(0.0), Some(100.0));
    let (_clock, mut controller, _log) = controller_with(options, 0.0, 100.0);
    controller.move_by(-1.0);
    assert_eq!(controller.window(), TimeWindow::new(-100.0, 0.0));
}

#[test]
fn move_to_recenters_through_the_notifying_path() {
    let (_clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    controller.move_to(80.0).expect("move to");
    assert_eq!(controller.window(), TimeWindow::new(30.0, 130.0));

    let events = log.borrow();
    let change = events
        .iter()
        .find_map(|event| match event {
            RangeEvent::RangeChange(change) => Some(*change),
            _ => None,
        })
        .expect("rangechange");
    assert!(change.by_user);
    assert_eq!(change.event, None);
}

#[test]
fn zoom_in_and_out_stay_centered_and_ignore_bad_percentages() {
    let (_clock, mut controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);

    controller
        .zoom_in(1.0, RangeRequest::default())
        .expect("zoom in");
    assert_eq!(controller.window(), TimeWindow::new(25.0, 75.0));

    controller
        .zoom_out(1.0, RangeRequest::default())
        .expect("zoom out");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));

    controller
        .zoom_in(0.0, RangeRequest::default())
        .expect("ignored");
    controller
        .zoom_out(2.0, RangeRequest::default())
        .expect("ignored");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
}

#[test]
fn zoom_about_center_respects_scale_direction() {
    let (_clock, mut controller, log) = controller_with(RangeOptions::default(), 0.0, 100.0);

    controller.zoom(2.0, None, 0.0, None).expect("zoom out");
    assert_eq!(controller.window(), TimeWindow::new(-50.0, 150.0));

    controller.zoom(0.5, Some(-50.0), 0.0, None).expect("zoom in");
    assert_eq!(controller.window(), TimeWindow::new(-50.0, 50.0));

    assert!(log
        .borrow()
        .iter()
        .filter_map(RangeEvent::change)
        .all(|change| change.by_user));
}

#[test]
fn hidden_intervals_are_skipped_when_mapping_pixels() {
    let (_clock, controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    let controller =
        controller.with_hidden_dates(StaticHiddenIntervals::new([HiddenInterval::new(25.0, 75.0)]));

    assert_eq!(controller.to_time(20.0), 10.0);
    assert_eq!(controller.to_time(60.0), 80.0);
    assert_eq!(controller.pointer_to_date(60.0, 0.0), 80.0);
}

#[test]
fn zoom_snaps_bounds_out_of_hidden_intervals() {
    let (_clock, controller, _log) = controller_with(RangeOptions::default(), 0.0, 100.0);
    let mut controller = controller
        .with_hidden_dates(StaticHiddenIntervals::new([HiddenInterval::new(-30.0, -10.0)]));

    // plain target would be [-25, 125]
    controller.zoom(1.5, None, -1.0, None).expect("zoom out");
    assert_eq!(controller.window(), TimeWindow::new(-31.0, 125.0));
}

#[test]
fn zoom_floor_wins_over_bounds_narrower_than_it() {
    // bounds span 5 ms, default zoom floor is 10 ms
    let options = RangeOptions::default().with_bounds(Some(0.0), Some(5.0));
    let (_clock, mut controller, log) = controller_with(options, 0.0, 100.0);
    assert_eq!(controller.window(), TimeWindow::new(-2.5, 7.5));

    controller
        .set_range(Some(1.0), Some(2.0), RangeRequest::default())
        .expect("set range");
    let window = controller.window();
    assert_eq!(window, TimeWindow::new(-2.5, 7.5));
    assert!(window.start < 0.0 && window.end > 5.0);
    assert_eq!(window.span(), 10.0);
    assert_eq!(count(&log, RangeEventKind::RangeChange), 0);
}
