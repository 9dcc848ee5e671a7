//! Pinhole-camera sizing of the on-photo reference square.
//!
//! The sensor captures a vertical span of `distance * sensor_height / focal_length`
//! metres at the subject distance (similar triangles). Dividing the image height
//! by that span gives pixels per metre, which scales the reference size into a
//! box side in image pixels.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_FOCAL_LENGTH_MM, DEFAULT_SENSOR_HEIGHT_MM};
use crate::error::{Result, WeedCountError};
use crate::geometry::Size;

/// Fixed optics of the capturing device. No runtime camera-model detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptics {
    pub focal_length_mm: f64,
    pub sensor_height_mm: f64,
}

impl Default for CameraOptics {
    fn default() -> Self {
        Self {
            focal_length_mm: DEFAULT_FOCAL_LENGTH_MM,
            sensor_height_mm: DEFAULT_SENSOR_HEIGHT_MM,
        }
    }
}

/// Side length, in image pixels, of the square reference box.
/// Always square and never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceBoxSize {
    side: f64,
}

impl ReferenceBoxSize {
    pub fn width(&self) -> f64 {
        self.side
    }

    pub fn height(&self) -> f64 {
        self.side
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    pub fn as_size(&self) -> Size {
        Size::square(self.side)
    }
}

/// Intermediate values of one calibration, kept for reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub real_world_height_m: f64,
    pub pixels_per_meter: f64,
    pub box_size: ReferenceBoxSize,
}

fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WeedCountError::InvalidCalibration { parameter, value })
    }
}

/// Run the full calibration and keep the intermediate quantities.
///
/// Rejects non-positive or non-finite distance, optics, and reference size.
/// An image height of zero is accepted and yields a zero-sized box.
pub fn calibrate(
    image_height_px: f64,
    assumed_distance_m: f64,
    focal_length_mm: f64,
    sensor_height_mm: f64,
    reference_size_m: f64,
) -> Result<Calibration> {
    if !image_height_px.is_finite() || image_height_px < 0.0 {
        return Err(WeedCountError::InvalidCalibration {
            parameter: "image_height_px",
            value: image_height_px,
        });
    }
    let distance = require_positive("assumed_distance_m", assumed_distance_m)?;
    let focal = require_positive("focal_length_mm", focal_length_mm)?;
    let sensor = require_positive("sensor_height_mm", sensor_height_mm)?;
    let reference = require_positive("reference_size_m", reference_size_m)?;

    let real_world_height_m = (distance * sensor) / focal;
    let pixels_per_meter = image_height_px / real_world_height_m;
    let side = reference * pixels_per_meter;

    debug!(
        image_height_px,
        real_world_height_m, pixels_per_meter, side, "reference box calibrated"
    );

    Ok(Calibration {
        real_world_height_m,
        pixels_per_meter,
        box_size: ReferenceBoxSize { side },
    })
}

/// Size of the reference square for an image of the given height.
pub fn compute_reference_box_size(
    image_height_px: f64,
    assumed_distance_m: f64,
    focal_length_mm: f64,
    sensor_height_mm: f64,
    reference_size_m: f64,
) -> Result<ReferenceBoxSize> {
    calibrate(
        image_height_px,
        assumed_distance_m,
        focal_length_mm,
        sensor_height_mm,
        reference_size_m,
    )
    .map(|c| c.box_size)
}

/// Convenience wrapper taking the device optics as one value.
pub fn box_size_for_optics(
    image_height_px: f64,
    assumed_distance_m: f64,
    optics: &CameraOptics,
    reference_size_m: f64,
) -> Result<ReferenceBoxSize> {
    compute_reference_box_size(
        image_height_px,
        assumed_distance_m,
        optics.focal_length_mm,
        optics.sensor_height_mm,
        reference_size_m,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive_rejects_nan_and_infinity() {
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert!(require_positive("x", -0.0).is_err());
        assert_eq!(require_positive("x", 2.5).unwrap(), 2.5);
    }
}
