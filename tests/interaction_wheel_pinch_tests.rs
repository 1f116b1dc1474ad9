use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use timeline_range::api::{
    AnimationOptions, RangeController, RangeControllerConfig, RangeOptions,
};
use timeline_range::core::{EasingFunction, ManualClock, TimeWindow, Viewport};
use timeline_range::extensions::{RangeEvent, RangeEventKind};
use timeline_range::interaction::{GestureEvent, InputEvent, Modifiers, PinchEvent, WheelEvent, ZoomKey};

const NOW: f64 = 1_700_000_000_000.0;

fn controller_with(options: RangeOptions) -> RangeController<ManualClock> {
    let clock = ManualClock::new(NOW);
    let config = RangeControllerConfig::new(options)
        .with_window(0.0, 100.0)
        .with_viewport(Viewport::new(100.0, 40.0));
    RangeController::new(clock, config).expect("controller")
}

fn scroll_away(x: f64) -> WheelEvent {
    // one notch away from the user
    WheelEvent::at(x, 10.0).with_delta_y(-3.0)
}

#[test]
fn wheel_zooms_in_around_the_pointer() {
    let mut controller = controller_with(RangeOptions::default());
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    controller.on(RangeEventKind::RangeChange, move |event: &RangeEvent| {
        sink.borrow_mut().push(*event)
    });

    let event = scroll_away(25.0);
    assert!(controller.wheel(event).expect("wheel"));

    let window = controller.window();
    let scale = 1.0 / 1.2;
    assert_relative_eq!(window.start, 25.0 - 25.0 * scale, epsilon = 1e-9);
    assert_relative_eq!(window.end, 25.0 + 75.0 * scale, epsilon = 1e-9);

    let change = log.borrow()[0].change().copied().expect("payload");
    assert!(change.by_user);
    assert_eq!(change.event, Some(InputEvent::Wheel(event)));
}

#[test]
fn wheel_towards_user_zooms_out() {
    let mut controller = controller_with(RangeOptions::default());
    let event = WheelEvent::at(50.0, 10.0).with_wheel_delta(-120.0);
    assert!(controller.wheel(event).expect("wheel"));

    let window = controller.window();
    assert_relative_eq!(window.start, -10.0, epsilon = 1e-9);
    assert_relative_eq!(window.end, 110.0, epsilon = 1e-9);
}

#[test]
fn zoom_friction_softens_each_step() {
    let options = RangeOptions::default().with_zoom_friction(10.0);
    let mut controller = controller_with(options);
    assert!(controller.wheel(scroll_away(50.0)).expect("wheel"));

    let span = controller.window().span();
    assert_relative_eq!(span, 100.0 / 1.1, epsilon = 1e-9);
}

#[test]
fn configured_zoom_key_must_be_held() {
    let options = RangeOptions::default().with_zoom_key(Some(ZoomKey::Ctrl));
    let mut controller = controller_with(options);

    assert!(!controller.wheel(scroll_away(50.0)).expect("ignored"));
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));

    let held = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    assert!(controller
        .wheel(scroll_away(50.0).with_modifiers(held))
        .expect("zoom"));
    assert!(controller.window().span() < 100.0);
}

#[test]
fn wheel_never_pans_and_requires_both_flags() {
    for (moveable, zoomable) in [(true, false), (false, true), (false, false)] {
        let options = RangeOptions::default().with_interaction(moveable, zoomable);
        let mut controller = controller_with(options);
        assert!(!controller.wheel(scroll_away(50.0)).expect("ignored"));
        assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
    }
}

#[test]
fn wheel_outside_window_or_without_delta_is_not_handled() {
    let mut controller = controller_with(RangeOptions::default());
    assert!(!controller.wheel(scroll_away(150.0)).expect("outside"));
    assert!(!controller.wheel(WheelEvent::at(50.0, 10.0)).expect("no delta"));
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
}

#[test]
fn pinch_scales_the_touch_window_around_the_anchor() {
    let mut controller = controller_with(RangeOptions::default());
    controller.touch(GestureEvent::at(50.0, 10.0));

    controller
        .pinch(PinchEvent::new(50.0, 10.0, 2.0))
        .expect("pinch");
    assert_eq!(controller.window(), TimeWindow::new(25.0, 75.0));
    assert_eq!(controller.interaction().pinch_center_date(), Some(50.0));

    controller
        .pinch(PinchEvent::new(80.0, 10.0, 4.0))
        .expect("pinch");
    assert_eq!(controller.window(), TimeWindow::new(37.5, 62.5));
}

#[test]
fn pinch_disables_dragging_until_next_touch() {
    let mut controller = controller_with(RangeOptions::default());
    controller.touch(GestureEvent::at(50.0, 10.0));
    controller
        .pinch(PinchEvent::new(50.0, 10.0, 1.0))
        .expect("pinch");
    assert!(!controller.interaction().allow_dragging());

    controller.drag_start(GestureEvent::at(50.0, 10.0));
    assert!(!controller.interaction().dragging());

    controller.release();
    assert_eq!(controller.interaction().pinch_center(), None);
    controller.touch(GestureEvent::at(50.0, 10.0));
    controller.drag_start(GestureEvent::at(50.0, 10.0));
    assert!(controller.interaction().dragging());
}

#[test]
fn degenerate_pinch_scale_is_ignored() {
    let mut controller = controller_with(RangeOptions::default());
    controller.touch(GestureEvent::at(50.0, 10.0));
    controller
        .pinch(PinchEvent::new(50.0, 10.0, 0.0))
        .expect("pinch");
    controller
        .pinch(PinchEvent::new(50.0, 10.0, f64::NAN))
        .expect("pinch");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
}

#[test]
fn pinch_requires_moveable_and_zoomable() {
    let options = RangeOptions::default().with_interaction(true, false);
    let mut controller = controller_with(options);
    controller.touch(GestureEvent::at(50.0, 10.0));
    controller
        .pinch(PinchEvent::new(50.0, 10.0, 2.0))
        .expect("pinch");
    assert_eq!(controller.window(), TimeWindow::new(0.0, 100.0));
    assert!(controller.interaction().allow_dragging());
}

#[test]
fn pinch_during_drag_ends_the_drag_so_animations_resume() {
    let mut controller = controller_with(RangeOptions::default());
    let grab = GestureEvent::at(50.0, 10.0);
    controller.touch(grab);
    controller.drag_start(grab);
    assert!(controller.interaction().dragging());

    controller
        .pinch(PinchEvent::new(50.0, 10.0, 1.0))
        .expect("pinch");
    assert!(!controller.interaction().dragging());
    controller.release();

    let animation = AnimationOptions::default()
        .with_duration_ms(40.0)
        .with_easing(EasingFunction::Linear);
    controller
        .set_window(0.0, 200.0, animation)
        .expect("animated set");
    for _ in 0..3 {
        controller.clock().advance(20.0);
        controller.run_due_timers();
    }
    assert!(!controller.is_animating());
    assert_eq!(controller.window(), TimeWindow::new(0.0, 200.0));
}
