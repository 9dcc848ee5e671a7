use weedcount_core::readout::{format_orientation, format_plant_count};

use crate::app::WeedCountApp;

pub fn show(ctx: &egui::Context, app: &mut WeedCountApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed at three lines and scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| match app.review.session().review() {
            Some(review) => {
                ui.strong(format_plant_count(review.plant_count()));
                ui.separator();
                ui.label(format_orientation(review.orientation()));
                ui.separator();
                ui.label(format!("{}x{}", review.image().width(), review.image().height()));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", review.transform().scale * 100.0));
                ui.separator();
                ui.label(format!("Box: {:.0} px", review.box_size().side()));
            }
            None => {
                ui.label("No photo");
            }
        });

        ui.add_space(2.0);
    });
}
