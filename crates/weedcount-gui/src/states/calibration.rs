use weedcount_core::settings::Settings;

/// Editable copy of the settings; only applied on request.
pub struct CalibrationDraft {
    pub settings: Settings,
    pub dirty: bool,
}

impl CalibrationDraft {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dirty: false,
        }
    }
}
