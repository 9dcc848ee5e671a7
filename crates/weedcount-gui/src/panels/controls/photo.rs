use crate::app::WeedCountApp;
use crate::panels::menu_bar::open_photo;

pub(super) fn photo_section(ui: &mut egui::Ui, app: &mut WeedCountApp) {
    let status = app.ui_state.capture_in_progress.then_some("capturing...");
    super::section_header(ui, "Photo", status);
    ui.add_space(4.0);

    ui.add_enabled_ui(!app.ui_state.capture_in_progress, |ui| {
        if ui.button("Take Photo...").clicked() {
            open_photo(app);
        }
    });

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }

    if let Some(review) = app.review.session().review() {
        ui.small(format!("{}x{}", review.image().width(), review.image().height()));
        ui.small(format!("Reference box: {:.1} px", review.box_size().side()));
    }

    ui.add_space(4.0);
    ui.small("Drag to pan, pinch or Ctrl+scroll to zoom.");
    ui.small("Click inside the red square to mark a plant.");
}
