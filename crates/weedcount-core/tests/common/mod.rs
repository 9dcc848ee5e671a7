#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use weedcount_core::capture::CapturedImage;
use weedcount_core::controller::ReviewController;
use weedcount_core::orientation::SharedOrientation;
use weedcount_core::settings::Settings;

/// Solid mid-grey RGBA image of the given size.
pub fn grey_image(width: u32, height: u32) -> CapturedImage {
    let pixels = vec![128u8; (width * height * 4) as usize];
    CapturedImage::from_rgba(width, height, pixels).unwrap()
}

/// Default settings with a short poll interval so tests do not wait long.
pub fn fast_settings() -> Settings {
    let mut settings = Settings::default();
    settings.review.poll_interval_ms = 5;
    settings
}

pub fn controller_with_shared_source() -> (ReviewController, SharedOrientation) {
    let source = SharedOrientation::new();
    let controller = ReviewController::new(Arc::new(source.clone()), fast_settings()).unwrap();
    (controller, source)
}

/// Poll `cond` until it holds or two seconds pass.
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}
