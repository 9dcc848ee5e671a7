use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calibration::{calibrate, Calibration, CameraOptics, ReferenceBoxSize};
use crate::consts::{DEFAULT_ASSUMED_DISTANCE_M, DEFAULT_POLL_INTERVAL_MS, ONE_FOOT_M};
use crate::error::{Result, WeedCountError};

/// Everything a review session needs besides the photo itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub optics: CameraOptics,
    #[serde(default)]
    pub calibration: CalibrationSettings,
    #[serde(default)]
    pub review: ReviewSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Camera-to-ground distance used in place of a measurement.
    pub assumed_distance_m: f64,
    /// Real-world side of the reference square.
    pub reference_size_m: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            assumed_distance_m: DEFAULT_ASSUMED_DISTANCE_M,
            reference_size_m: ONE_FOOT_M,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Orientation readout refresh interval.
    pub poll_interval_ms: u64,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Rejects anything the calibration would reject, and a zero poll interval.
    pub fn validate(&self) -> Result<()> {
        if self.review.poll_interval_ms == 0 {
            return Err(WeedCountError::InvalidSettings(
                "review.poll_interval_ms must be > 0".into(),
            ));
        }
        // A unit-height calibration exercises every optics/distance check.
        self.calibrate_for(1.0).map(|_| ())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.review.poll_interval_ms)
    }

    pub fn calibrate_for(&self, image_height_px: f64) -> Result<Calibration> {
        calibrate(
            image_height_px,
            self.calibration.assumed_distance_m,
            self.optics.focal_length_mm,
            self.optics.sensor_height_mm,
            self.calibration.reference_size_m,
        )
    }

    pub fn box_size_for(&self, image_height_px: f64) -> Result<ReferenceBoxSize> {
        self.calibrate_for(image_height_px).map(|c| c.box_size)
    }
}
