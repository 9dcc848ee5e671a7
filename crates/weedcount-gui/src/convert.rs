use weedcount_core::capture::CapturedImage;
use weedcount_core::geometry::{Point, Rect};

/// Convert a captured RGBA photo to an egui ColorImage.
pub fn captured_to_color_image(image: &CapturedImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.rgba(),
    )
}

/// View-local point to screen position, given the view's top-left corner.
pub fn to_screen_pos(p: Point, origin: egui::Pos2) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

pub fn to_screen_rect(r: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        to_screen_pos(r.min, origin),
        egui::vec2(r.size.width as f32, r.size.height as f32),
    )
}

/// Screen position to view-local point.
pub fn to_view_point(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    let local = pos - origin;
    Point::new(local.x as f64, local.y as f64)
}
