mod calibration;
mod tilt;
mod ui;
mod viewport;

pub use calibration::CalibrationDraft;
pub use tilt::TiltState;
pub use ui::UIState;
pub use viewport::ViewportState;
