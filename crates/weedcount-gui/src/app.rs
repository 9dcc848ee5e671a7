use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use anyhow::Result;
use weedcount_core::capture::CapturedImage;
use weedcount_core::controller::ReviewController;
use weedcount_core::orientation::{OrientationFeed, OrientationSample, SharedOrientation};
use weedcount_core::settings::Settings;

use crate::convert::captured_to_color_image;
use crate::messages::AppEvent;
use crate::panels;
use crate::states::{CalibrationDraft, TiltState, UIState, ViewportState};

pub struct WeedCountApp {
    pub event_tx: mpsc::Sender<AppEvent>,
    pub event_rx: mpsc::Receiver<AppEvent>,
    pub review: ReviewController,
    pub orientation_feed: OrientationFeed,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub tilt: TiltState,
    pub draft: CalibrationDraft,
    pub show_about: bool,
}

impl WeedCountApp {
    pub fn new(_ctx: &egui::Context) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let source = SharedOrientation::new();
        let orientation_feed = source.feed();
        let settings = Settings::default();
        let review = ReviewController::new(Arc::new(source), settings.clone())?;

        Ok(Self {
            event_tx,
            event_rx,
            review,
            orientation_feed,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            tilt: TiltState::default(),
            draft: CalibrationDraft::new(settings),
            show_about: false,
        })
    }

    /// Drain all pending events from dialog threads.
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::CaptureFinished { path, image } => {
                    self.ui_state.capture_in_progress = false;
                    self.finish_capture(ctx, path, image);
                }
                AppEvent::CaptureFailed { path, message } => {
                    self.ui_state.capture_in_progress = false;
                    self.ui_state
                        .add_log(format!("ERROR: {}: {message}", path.display()));
                }
                AppEvent::SettingsImported { settings } => {
                    self.apply_settings(settings);
                }
                AppEvent::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn finish_capture(
        &mut self,
        ctx: &egui::Context,
        path: Option<PathBuf>,
        image: Option<CapturedImage>,
    ) {
        let Some(image) = image else {
            // Cancelled: the photo under review, if any, stays.
            self.ui_state.add_log("Capture cancelled".into());
            return;
        };

        let color_image = captured_to_color_image(&image);
        let (width, height) = (image.width(), image.height());
        match self.review.on_capture_finished(Some(image)) {
            Ok(_) => {
                self.viewport.texture =
                    Some(ctx.load_texture("capture", color_image, egui::TextureOptions::LINEAR));
                self.viewport.pinch_active = false;
                self.viewport.drag_translation = egui::Vec2::ZERO;
                let box_side = self
                    .review
                    .session()
                    .review()
                    .map_or(0.0, |r| r.box_size().side());
                self.ui_state.add_log(format!(
                    "Opened: {} ({width}x{height}, box {box_side:.0} px)",
                    path.as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<camera>".into()),
                ));
                self.ui_state.file_path = path;
            }
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        match self.review.set_settings(settings.clone()) {
            Ok(()) => {
                self.draft = CalibrationDraft::new(settings);
                self.ui_state
                    .add_log("Settings applied (takes effect on next photo)".into());
            }
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }

    fn feed_tilt(&self) {
        if self.tilt.enabled {
            self.orientation_feed
                .push(OrientationSample::new(self.tilt.pitch, self.tilt.roll));
        } else {
            self.orientation_feed.clear();
        }
    }
}

impl eframe::App for WeedCountApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ctx);
        self.feed_tilt();
        self.review.pump();

        // Keep the orientation readout ticking while a photo is under review.
        if !self.review.session().is_idle() {
            ctx.request_repaint_after(self.review.settings().poll_interval());
        }

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About WeedCount")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("WeedCount");
                        ui.label("Count weeds inside a one-foot reference square");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
