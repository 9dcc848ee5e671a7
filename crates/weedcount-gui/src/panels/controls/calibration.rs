use crate::app::WeedCountApp;

pub(super) fn calibration_section(ui: &mut egui::Ui, app: &mut WeedCountApp) {
    let status = app.draft.dirty.then_some("unapplied");
    super::section_header(ui, "Calibration", status);
    ui.add_space(4.0);

    let mut changed = false;
    let settings = &mut app.draft.settings;

    egui::Grid::new("calibration_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Distance (m)");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut settings.calibration.assumed_distance_m)
                        .speed(0.01)
                        .range(0.01..=100.0),
                )
                .changed();
            ui.end_row();

            ui.label("Reference (m)");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut settings.calibration.reference_size_m)
                        .speed(0.001)
                        .range(0.001..=10.0),
                )
                .changed();
            ui.end_row();

            ui.label("Focal length (mm)");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut settings.optics.focal_length_mm)
                        .speed(0.01)
                        .range(0.1..=500.0),
                )
                .changed();
            ui.end_row();

            ui.label("Sensor height (mm)");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut settings.optics.sensor_height_mm)
                        .speed(0.01)
                        .range(0.1..=100.0),
                )
                .changed();
            ui.end_row();
        });

    if changed {
        app.draft.dirty = true;
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.draft.dirty, egui::Button::new("Apply"))
            .clicked()
        {
            let settings = app.draft.settings.clone();
            app.apply_settings(settings);
        }
        if ui
            .add_enabled(app.draft.dirty, egui::Button::new("Revert"))
            .clicked()
        {
            app.draft = crate::states::CalibrationDraft::new(app.review.settings().clone());
        }
    });
    ui.small("Applies to the next photo.");
}
