mod common;

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use weedcount_core::orientation::{
    OrientationSample, OrientationSource, SharedOrientation, UnavailableOrientation,
};
use weedcount_core::poller::OrientationPoller;

use common::wait_until;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[test]
fn test_shared_source_absent_until_first_reading() {
    let source = SharedOrientation::new();
    source.start();
    assert_eq!(source.sample(), None);
    source.feed().push(OrientationSample::new(0.12, -0.34));
    assert_eq!(source.sample(), Some(OrientationSample::new(0.12, -0.34)));
}

#[test]
fn test_shared_source_reads_absent_while_stopped() {
    let source = SharedOrientation::new();
    source.feed().push(OrientationSample::new(1.0, 1.0));
    assert_eq!(source.sample(), None);
    source.start();
    assert!(source.sample().is_some());
    source.stop();
    assert!(!source.is_running());
    assert_eq!(source.sample(), None);
}

#[test]
fn test_shared_source_start_is_idempotent() {
    let source = SharedOrientation::new();
    source.start();
    source.start();
    assert!(source.is_running());
    source.feed().push(OrientationSample::new(0.5, 0.0));
    assert_eq!(source.sample().map(|s| s.pitch), Some(0.5));
}

#[test]
fn test_feed_clear_forgets_reading() {
    let source = SharedOrientation::new();
    source.start();
    let feed = source.feed();
    feed.push(OrientationSample::new(0.2, 0.2));
    feed.clear();
    assert_eq!(source.sample(), None);
}

#[test]
fn test_unavailable_source_never_reports() {
    let source = UnavailableOrientation;
    source.start();
    assert_eq!(source.sample(), None);
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

#[test]
fn test_poller_forwards_latest_reading() {
    let source = SharedOrientation::new();
    source.start();
    source.feed().push(OrientationSample::new(0.25, 0.75));

    let (tx, rx) = mpsc::sync_channel(1);
    let mut poller =
        OrientationPoller::spawn(Arc::new(source.clone()), Duration::from_millis(5), tx).unwrap();

    let got = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(got, Some(OrientationSample::new(0.25, 0.75)));
    assert!(poller.is_running());

    poller.stop();
    assert!(!poller.is_running());
}

#[test]
fn test_poller_forwards_absent_readings() {
    let (tx, rx) = mpsc::sync_channel(1);
    let _poller = OrientationPoller::spawn(
        Arc::new(UnavailableOrientation),
        Duration::from_millis(5),
        tx,
    )
    .unwrap();
    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), None);
}

#[test]
fn test_stopped_poller_closes_channel() {
    let (tx, rx) = mpsc::sync_channel(1);
    let mut poller = OrientationPoller::spawn(
        Arc::new(UnavailableOrientation),
        Duration::from_millis(5),
        tx,
    )
    .unwrap();
    poller.stop();
    poller.stop();
    // Drain whatever was sent before the stop; then the sender is gone.
    while rx.try_recv().is_ok() {}
    assert!(matches!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(mpsc::RecvTimeoutError::Disconnected)
    ));
}

#[test]
fn test_poller_exits_when_receiver_dropped() {
    let (tx, rx) = mpsc::sync_channel(1);
    let poller = OrientationPoller::spawn(
        Arc::new(UnavailableOrientation),
        Duration::from_millis(2),
        tx,
    )
    .unwrap();
    drop(rx);
    assert!(wait_until(|| !poller.is_running()));
}

#[test]
fn test_poller_rejects_zero_interval() {
    let (tx, _rx) = mpsc::sync_channel(1);
    assert!(OrientationPoller::spawn(Arc::new(UnavailableOrientation), Duration::ZERO, tx).is_err());
}

#[test]
fn test_unread_readings_do_not_pile_up() {
    let source = SharedOrientation::new();
    source.start();
    let feed = source.feed();
    feed.push(OrientationSample::new(0.1, 0.1));

    let (tx, rx) = mpsc::sync_channel(1);
    let _poller =
        OrientationPoller::spawn(Arc::new(source.clone()), Duration::from_millis(2), tx).unwrap();

    // Many ticks pass while nobody reads.
    std::thread::sleep(Duration::from_millis(60));
    feed.push(OrientationSample::new(0.9, 0.9));

    // Roughly thirty ticks fired; only the buffered reading is waiting.
    assert_eq!(rx.try_recv().unwrap(), Some(OrientationSample::new(0.1, 0.1)));
    assert!(rx.try_iter().count() < 5);
    // The slot refills with the current reading on a later tick.
    assert!(wait_until(|| rx.try_recv() == Ok(Some(OrientationSample::new(0.9, 0.9)))));
}
