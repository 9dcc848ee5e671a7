use crate::consts::ORIENTATION_DECIMALS;
use crate::orientation::OrientationSample;

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let divisor = 10f64.powi(places);
    (value * divisor).round() / divisor
}

/// `Pitch: p, Roll: r` with two decimals. A missing reading shows as zeros.
pub fn format_orientation(sample: Option<OrientationSample>) -> String {
    let s = sample.unwrap_or_default();
    let places = ORIENTATION_DECIMALS as usize;
    format!(
        "Pitch: {:.places$}, Roll: {:.places$}",
        clean_zero(round_to(s.pitch, ORIENTATION_DECIMALS)),
        clean_zero(round_to(s.roll, ORIENTATION_DECIMALS)),
    )
}

pub fn format_plant_count(count: usize) -> String {
    format!("Plants: {count}")
}

// Tiny negative readings round to -0.0, which would print as "-0.00".
fn clean_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
