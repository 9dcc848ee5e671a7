//! Device tilt readings and the sources that provide them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

/// Device tilt in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub pitch: f64,
    pub roll: f64,
}

impl OrientationSample {
    pub fn new(pitch: f64, roll: f64) -> Self {
        Self { pitch, roll }
    }
}

/// A motion sensor wrapper the review session polls for its latest reading.
///
/// `sample` must never block; it returns whatever was most recently cached, or
/// `None` while the sensor is stopped or has not produced a reading yet.
pub trait OrientationSource: Send + Sync {
    /// Begin background sampling. Calling it again while running is a no-op.
    fn start(&self);

    /// Stop background sampling. Later samples read as absent until restarted.
    fn stop(&self);

    fn sample(&self) -> Option<OrientationSample>;
}

/// A source for hosts without a motion sensor. Always reads as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableOrientation;

impl OrientationSource for UnavailableOrientation {
    fn start(&self) {}

    fn stop(&self) {}

    fn sample(&self) -> Option<OrientationSample> {
        None
    }
}

#[derive(Debug, Default)]
struct SharedState {
    latest: RwLock<Option<OrientationSample>>,
    running: AtomicBool,
}

/// Source whose readings are pushed in from elsewhere through an
/// [`OrientationFeed`], e.g. a platform sensor callback or manual UI inputs.
#[derive(Clone, Debug, Default)]
pub struct SharedOrientation {
    state: Arc<SharedState>,
}

/// Write side of a [`SharedOrientation`].
#[derive(Clone, Debug)]
pub struct OrientationFeed {
    state: Arc<SharedState>,
}

impl SharedOrientation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self) -> OrientationFeed {
        OrientationFeed {
            state: Arc::clone(&self.state),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::Acquire)
    }
}

impl OrientationFeed {
    /// Replace the cached reading.
    pub fn push(&self, sample: OrientationSample) {
        let mut latest = match self.state.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *latest = Some(sample);
    }

    /// Forget the cached reading, as if the sensor had never reported.
    pub fn clear(&self) {
        let mut latest = match self.state.latest.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *latest = None;
    }
}

impl OrientationSource for SharedOrientation {
    fn start(&self) {
        if !self.state.running.swap(true, Ordering::AcqRel) {
            debug!("orientation source started");
        }
    }

    fn stop(&self) {
        if self.state.running.swap(false, Ordering::AcqRel) {
            debug!("orientation source stopped");
        }
    }

    fn sample(&self) -> Option<OrientationSample> {
        if !self.is_running() {
            return None;
        }
        match self.state.latest.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
