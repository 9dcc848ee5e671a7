use weedcount_core::capture::CapturedImage;
use weedcount_core::settings::Settings;

use crate::app::WeedCountApp;
use crate::messages::AppEvent;

pub fn show(ctx: &egui::Context, app: &mut WeedCountApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Photo...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_photo(app);
                }

                ui.separator();

                if ui.button("Import Settings...").clicked() {
                    ui.close();
                    import_settings(app);
                }

                if ui.button("Export Settings...").clicked() {
                    ui.close();
                    export_settings(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let reset_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Num0);
                if ui.add(egui::Button::new("Reset View").shortcut_text(ctx.format_shortcut(&reset_shortcut))).clicked() {
                    ui.close();
                    app.review.reset_view();
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Settings").clicked() {
                    ui.close();
                    app.apply_settings(Settings::default());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_photo(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Num0))) {
            app.review.reset_view();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Run the capture flow: a modal file dialog standing in for the camera.
/// Always reports back, with no image when the user cancels.
pub fn open_photo(app: &mut WeedCountApp) {
    if app.ui_state.capture_in_progress {
        return;
    }
    app.ui_state.capture_in_progress = true;

    let event_tx = app.event_tx.clone();
    std::thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .add_filter("Photos", &["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"])
            .add_filter("All files", &["*"])
            .pick_file();

        let event = match picked {
            None => AppEvent::CaptureFinished {
                path: None,
                image: None,
            },
            Some(path) => match CapturedImage::open(&path) {
                Ok(image) => AppEvent::CaptureFinished {
                    path: Some(path),
                    image: Some(image),
                },
                Err(e) => AppEvent::CaptureFailed {
                    path,
                    message: e.to_string(),
                },
            },
        };
        let _ = event_tx.send(event);
    });
}

fn import_settings(app: &mut WeedCountApp) {
    let event_tx = app.event_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str::<Settings>(&content).map_err(|e| e.to_string()));
        let event = match parsed {
            Ok(settings) => AppEvent::SettingsImported { settings },
            Err(e) => AppEvent::Log {
                message: format!("ERROR: {}: {e}", path.display()),
            },
        };
        let _ = event_tx.send(event);
    });
}

fn export_settings(app: &mut WeedCountApp) {
    let settings = app.review.settings().clone();
    let event_tx = app.event_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("weedcount.toml")
            .save_file()
        {
            let written = toml::to_string_pretty(&settings)
                .map_err(|e| e.to_string())
                .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
            let message = match written {
                Ok(()) => format!("Settings saved: {}", path.display()),
                Err(e) => format!("ERROR: {}: {e}", path.display()),
            };
            let _ = event_tx.send(AppEvent::Log { message });
        }
    });
}
