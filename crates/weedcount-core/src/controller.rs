use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;

use tracing::debug;

use crate::capture::CapturedImage;
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::orientation::{OrientationSample, OrientationSource};
use crate::poller::OrientationPoller;
use crate::session::{DragUpdate, PinchUpdate, ReviewState, Session, TapOutcome};
use crate::settings::Settings;

/// Owns the review session together with the orientation source and the
/// polling task that feeds it.
///
/// Polling is tied to the session: a new capture stops the previous poller
/// and starts a fresh one, and [`ReviewController::end`] (or dropping the
/// controller) stops it for good. Readings arrive on the poller thread and are
/// applied on the owner's thread by [`ReviewController::pump`].
pub struct ReviewController {
    session: Session,
    settings: Settings,
    source: Arc<dyn OrientationSource>,
    poller: Option<OrientationPoller>,
    samples: Option<mpsc::Receiver<Option<OrientationSample>>>,
}

impl ReviewController {
    pub fn new(source: Arc<dyn OrientationSource>, settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            session: Session::Idle,
            settings,
            source,
            poller: None,
            samples: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. They take effect with the next capture; the photo
    /// under review keeps the box it was calibrated with.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(OrientationPoller::is_running)
    }

    /// Capture flow finished, with a photo or cancelled (`None`).
    ///
    /// The new session and its poller are both prepared before either replaces
    /// the current ones, so on error the photo under review and its polling
    /// carry on unchanged.
    pub fn on_capture_finished(&mut self, image: Option<CapturedImage>) -> Result<bool> {
        let Some(image) = image else {
            return self.session.on_capture_finished(None, &self.settings);
        };
        let next = ReviewState::new(Arc::new(image), &self.settings)?;

        let (tx, rx) = mpsc::sync_channel(1);
        let poller =
            OrientationPoller::spawn(Arc::clone(&self.source), self.settings.poll_interval(), tx)?;

        self.stop_polling();
        self.source.start();
        self.poller = Some(poller);
        self.samples = Some(rx);
        self.session = Session::Reviewing(next);
        Ok(true)
    }

    fn stop_polling(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        self.samples = None;
    }

    /// Apply every reading received since the last call. Only the newest one
    /// is visible afterwards. Returns how many readings were drained.
    pub fn pump(&mut self) -> usize {
        let Some(rx) = self.samples.as_ref() else {
            return 0;
        };
        let mut drained = 0;
        let mut latest = None;
        loop {
            match rx.try_recv() {
                Ok(sample) => {
                    latest = Some(sample);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("orientation poller disconnected");
                    break;
                }
            }
        }
        if let Some(sample) = latest {
            self.session = std::mem::take(&mut self.session).with_orientation(sample);
        }
        drained
    }

    pub fn pinch(&mut self, update: PinchUpdate) {
        self.session = std::mem::take(&mut self.session).apply_pinch(update);
    }

    pub fn drag(&mut self, update: DragUpdate) {
        self.session = std::mem::take(&mut self.session).apply_drag(update);
    }

    pub fn tap(&mut self, location: Point, view: Size) -> TapOutcome {
        let (session, outcome) = std::mem::take(&mut self.session).apply_tap(location, view);
        self.session = session;
        outcome
    }

    pub fn reset_view(&mut self) {
        self.session = std::mem::take(&mut self.session).reset_view();
    }

    /// Stop polling and the sensor, and drop the photo under review.
    pub fn end(&mut self) {
        self.stop_polling();
        self.source.stop();
        self.session = Session::Idle;
    }
}

impl Drop for ReviewController {
    fn drop(&mut self) {
        self.stop_polling();
        self.source.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::SharedOrientation;

    fn grey(width: u32, height: u32) -> CapturedImage {
        CapturedImage::from_rgba(width, height, vec![128; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn test_failed_poller_start_keeps_current_review() {
        let source = SharedOrientation::new();
        let mut settings = Settings::default();
        settings.review.poll_interval_ms = 5;
        let mut controller = ReviewController::new(Arc::new(source.clone()), settings).unwrap();
        controller.on_capture_finished(Some(grey(80, 100))).unwrap();
        controller.tap(Point::new(200.0, 200.0), Size::new(400.0, 400.0));

        // Bypasses validation so the next poller cannot start.
        controller.settings.review.poll_interval_ms = 0;
        assert!(controller.on_capture_finished(Some(grey(40, 50))).is_err());

        let review = controller.session().review().unwrap();
        assert_eq!(review.image().height(), 100);
        assert_eq!(review.plant_count(), 1);
        assert!(controller.is_polling());
        assert!(source.is_running());
    }
}
