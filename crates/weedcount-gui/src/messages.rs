use std::path::PathBuf;

use weedcount_core::capture::CapturedImage;
use weedcount_core::settings::Settings;

/// Results sent from background dialog threads back to the UI thread.
pub enum AppEvent {
    /// The capture dialog closed. `image` is `None` when the user cancelled.
    CaptureFinished {
        path: Option<PathBuf>,
        image: Option<CapturedImage>,
    },
    /// A file was picked but could not be decoded.
    CaptureFailed {
        path: PathBuf,
        message: String,
    },
    SettingsImported {
        settings: Settings,
    },
    Log {
        message: String,
    },
}
