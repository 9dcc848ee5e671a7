mod common;

use std::sync::Arc;

use weedcount_core::controller::ReviewController;
use weedcount_core::geometry::{Point, Size, Vec2};
use weedcount_core::orientation::{OrientationSample, UnavailableOrientation};
use weedcount_core::session::{DragUpdate, PinchUpdate, TapOutcome};
use weedcount_core::settings::Settings;

use common::{controller_with_shared_source, fast_settings, grey_image, wait_until};

const VIEW: Size = Size {
    width: 400.0,
    height: 400.0,
};

#[test]
fn test_rejects_invalid_settings() {
    let mut settings = Settings::default();
    settings.optics.focal_length_mm = -1.0;
    assert!(ReviewController::new(Arc::new(UnavailableOrientation), settings).is_err());
}

#[test]
fn test_idle_until_capture_delivers_image() {
    let (mut controller, source) = controller_with_shared_source();
    assert!(controller.session().is_idle());
    assert!(!controller.on_capture_finished(None).unwrap());
    assert!(controller.session().is_idle());
    assert!(!controller.is_polling());
    assert!(!source.is_running());

    assert!(controller.on_capture_finished(Some(grey_image(80, 100))).unwrap());
    assert!(!controller.session().is_idle());
    assert!(controller.is_polling());
    assert!(source.is_running());
}

#[test]
fn test_pump_applies_latest_reading() {
    let (mut controller, source) = controller_with_shared_source();
    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    source.feed().push(OrientationSample::new(0.4, -0.2));

    assert!(wait_until(|| {
        controller.pump();
        controller.session().review().and_then(|r| r.orientation())
            == Some(OrientationSample::new(0.4, -0.2))
    }));
}

#[test]
fn test_pump_without_session_is_noop() {
    let (mut controller, _source) = controller_with_shared_source();
    assert_eq!(controller.pump(), 0);
}

#[test]
fn test_gestures_and_taps_route_to_session() {
    let (mut controller, _source) = controller_with_shared_source();
    assert_eq!(
        controller.tap(Point::new(200.0, 200.0), VIEW),
        TapOutcome::NoSession
    );

    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    controller.pinch(PinchUpdate::Changed { ratio: 1.5 });
    controller.pinch(PinchUpdate::Changed { ratio: 2.0 });
    controller.pinch(PinchUpdate::Ended);
    controller.drag(DragUpdate::Changed {
        translation: Vec2::new(3.0, 4.0),
    });
    controller.drag(DragUpdate::Ended);

    assert_eq!(
        controller.tap(Point::new(200.0, 200.0), VIEW),
        TapOutcome::Marked { count: 1 }
    );
    assert_eq!(controller.tap(Point::new(0.0, 0.0), VIEW), TapOutcome::Outside);

    let review = controller.session().review().unwrap();
    assert_eq!(review.transform().scale, 3.0);
    assert_eq!(review.transform().last_offset, Vec2::new(3.0, 4.0));
    assert_eq!(controller.session().plant_count(), 1);

    controller.reset_view();
    let review = controller.session().review().unwrap();
    assert!(review.transform().is_identity());
    assert_eq!(review.plant_count(), 1);
}

#[test]
fn test_new_capture_restarts_polling_and_resets_state() {
    let (mut controller, source) = controller_with_shared_source();
    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    controller.tap(Point::new(200.0, 200.0), VIEW);
    source.feed().push(OrientationSample::new(0.1, 0.1));
    assert!(wait_until(|| {
        controller.pump();
        controller.session().review().and_then(|r| r.orientation()).is_some()
    }));

    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    let review = controller.session().review().unwrap();
    assert_eq!(review.plant_count(), 0);
    assert!(review.orientation().is_none());
    assert!(controller.is_polling());
}

#[test]
fn test_end_stops_polling_and_sensor() {
    let (mut controller, source) = controller_with_shared_source();
    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    controller.end();
    assert!(!controller.is_polling());
    assert!(!source.is_running());
    assert!(controller.session().is_idle());
    assert_eq!(controller.pump(), 0);
}

#[test]
fn test_drop_stops_sensor() {
    let (mut controller, source) = controller_with_shared_source();
    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    drop(controller);
    assert!(!source.is_running());
}

#[test]
fn test_set_settings_applies_to_next_capture() {
    let (mut controller, _source) = controller_with_shared_source();
    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    let before = controller.session().review().unwrap().box_size().side();

    let mut settings = fast_settings();
    settings.calibration.assumed_distance_m = 2.0;
    controller.set_settings(settings).unwrap();
    assert_eq!(controller.session().review().unwrap().box_size().side(), before);

    controller.on_capture_finished(Some(grey_image(80, 100))).unwrap();
    let after = controller.session().review().unwrap().box_size().side();
    assert!((after - before / 2.0).abs() < 1e-9);

    let mut bad = fast_settings();
    bad.review.poll_interval_ms = 0;
    assert!(controller.set_settings(bad).is_err());
    assert_eq!(controller.settings().calibration.assumed_distance_m, 2.0);
}
