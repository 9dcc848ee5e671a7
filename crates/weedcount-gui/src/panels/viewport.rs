use weedcount_core::geometry::{Size, Vec2};
use weedcount_core::session::{DragUpdate, PinchUpdate, ReviewState, TapOutcome};

use crate::app::WeedCountApp;
use crate::convert::{to_screen_pos, to_screen_rect, to_view_point};

const BOX_STROKE_WIDTH: f32 = 2.0;
const MARK_RADIUS: f32 = 5.0;

pub fn show(ctx: &egui::Context, app: &mut WeedCountApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        let Some(texture_id) = texture_id.filter(|_| !app.review.session().is_idle()) else {
            show_placeholder(ui);
            return;
        };

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let view = Size::new(rect.width() as f64, rect.height() as f64);

        handle_pinch(ui, &response, app);
        handle_drag(&response, app);
        handle_tap(&response, app, rect, view);

        let Some(review) = app.review.session().review() else {
            return;
        };
        let img_rect = to_screen_rect(review.image_rect(view), rect.min);
        ui.painter().with_clip_rect(rect).image(
            texture_id,
            img_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        draw_reference_box(ui, rect, review, view);
        draw_marks(ui, rect, review);
        draw_count_label(ui, rect, review.plant_count());
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Touch pinch and ctrl+scroll both arrive as per-frame zoom factors.
/// The gesture ends on the first frame without one.
fn handle_pinch(ui: &egui::Ui, response: &egui::Response, app: &mut WeedCountApp) {
    let zoom = ui.input(|i| i.zoom_delta());
    if zoom != 1.0 && response.hovered() {
        app.review.pinch(PinchUpdate::Changed {
            ratio: zoom as f64,
        });
        app.viewport.pinch_active = true;
    } else if app.viewport.pinch_active {
        app.review.pinch(PinchUpdate::Ended);
        app.viewport.pinch_active = false;
    }
}

fn handle_drag(response: &egui::Response, app: &mut WeedCountApp) {
    if response.drag_started() {
        app.viewport.drag_translation = egui::Vec2::ZERO;
    }
    if response.dragged() {
        app.viewport.drag_translation += response.drag_delta();
        let t = app.viewport.drag_translation;
        app.review.drag(DragUpdate::Changed {
            translation: Vec2::new(t.x as f64, t.y as f64),
        });
    }
    if response.drag_stopped() {
        app.review.drag(DragUpdate::Ended);
        app.viewport.drag_translation = egui::Vec2::ZERO;
    }
}

fn handle_tap(response: &egui::Response, app: &mut WeedCountApp, rect: egui::Rect, view: Size) {
    if !response.clicked() {
        return;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    match app.review.tap(to_view_point(pos, rect.min), view) {
        TapOutcome::Marked { count } => {
            tracing::debug!(count, "plant marked from viewport");
        }
        TapOutcome::Outside | TapOutcome::NoSession => {}
    }
}

fn draw_reference_box(ui: &egui::Ui, rect: egui::Rect, review: &ReviewState, view: Size) {
    let box_rect = to_screen_rect(review.reference_rect(view), rect.min);
    ui.painter().rect_stroke(
        box_rect,
        0.0,
        egui::Stroke::new(BOX_STROKE_WIDTH, egui::Color32::RED),
        egui::epaint::StrokeKind::Middle,
    );
}

fn draw_marks(ui: &egui::Ui, rect: egui::Rect, review: &ReviewState) {
    let painter = ui.painter();
    for mark in review.marks() {
        let center = to_screen_pos(*mark, rect.min);
        painter.circle_filled(center, MARK_RADIUS, egui::Color32::from_rgb(80, 220, 80));
        painter.circle_stroke(center, MARK_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn draw_count_label(ui: &egui::Ui, rect: egui::Rect, count: usize) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        weedcount_core::readout::format_plant_count(count),
        egui::FontId::proportional(16.0),
        egui::Color32::from_white_alpha(220),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a photo to begin counting")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
