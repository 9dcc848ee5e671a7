use std::path::PathBuf;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// File of the photo under review.
    pub file_path: Option<PathBuf>,

    /// The capture dialog is open; a second one must not be started.
    pub capture_in_progress: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
