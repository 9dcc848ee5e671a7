/// Default lens focal length in millimetres (typical phone main camera).
pub const DEFAULT_FOCAL_LENGTH_MM: f64 = 4.25;

/// Default image sensor height in millimetres.
pub const DEFAULT_SENSOR_HEIGHT_MM: f64 = 4.80;

/// Assumed camera-to-ground distance in metres. There is no distance sensing,
/// so every calibration uses this value unless configured otherwise.
pub const DEFAULT_ASSUMED_DISTANCE_M: f64 = 1.0;

/// Side of the reference square in metres (one foot).
pub const ONE_FOOT_M: f64 = 0.3048;

/// Interval between orientation polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Decimal places shown in the orientation readout.
pub const ORIENTATION_DECIMALS: i32 = 2;
