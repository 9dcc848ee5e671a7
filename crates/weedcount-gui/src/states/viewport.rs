/// Viewport display state. Pan/zoom itself lives in the review session.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// A pinch (touch or ctrl+scroll) is in progress.
    pub pinch_active: bool,
    /// Pointer travel since the current drag began, in points.
    pub drag_translation: egui::Vec2,
}
