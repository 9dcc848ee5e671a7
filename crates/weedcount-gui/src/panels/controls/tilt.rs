use weedcount_core::readout::format_orientation;

use crate::app::WeedCountApp;

pub(super) fn tilt_section(ui: &mut egui::Ui, app: &mut WeedCountApp) {
    super::section_header(ui, "Orientation", None);
    ui.add_space(4.0);

    ui.checkbox(&mut app.tilt.enabled, "Manual tilt");
    ui.add_enabled_ui(app.tilt.enabled, |ui| {
        ui.horizontal(|ui| {
            ui.label("Pitch");
            ui.add(egui::DragValue::new(&mut app.tilt.pitch).speed(0.01).range(-3.15..=3.15));
            ui.label("Roll");
            ui.add(egui::DragValue::new(&mut app.tilt.roll).speed(0.01).range(-3.15..=3.15));
        });
    });

    let reading = app.review.session().review().and_then(|r| r.orientation());
    ui.small(format_orientation(reading));

    ui.add_space(8.0);
    super::section_header(ui, "View", None);
    ui.add_space(4.0);
    let has_photo = !app.review.session().is_idle();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_photo, egui::Button::new("Reset View"))
            .clicked()
        {
            app.review.reset_view();
        }
    });
}
