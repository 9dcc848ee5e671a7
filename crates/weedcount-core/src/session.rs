//! Review-session state and its transitions.
//!
//! A session covers one captured photo. Gestures are applied through pure
//! transitions that consume the current [`ReviewState`] and return the next
//! one, so renderers only ever project a snapshot of the state.
//!
//! The reference rectangle is placed in fixed view coordinates: centred in the
//! view, with a side equal to the calibrated box size in image pixels, and not
//! moved or scaled by pan/zoom. Hit-testing uses the same rectangle.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::calibration::ReferenceBoxSize;
use crate::capture::CapturedImage;
use crate::error::Result;
use crate::geometry::{Point, Rect, Size, Vec2};
use crate::orientation::OrientationSample;
use crate::settings::Settings;

/// Pan/zoom applied to the displayed photo.
///
/// `last_scale`/`last_offset` are the values committed at the end of the
/// previous gesture, so a new gesture composes onto them instead of starting
/// over. `scale` is always > 0; neither zoom nor pan is bounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: Vec2,
    pub last_scale: f64,
    pub last_offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            last_scale: 1.0,
            last_offset: Vec2::ZERO,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Where the photo lands in the view: fitted (aspect preserved), scaled
    /// about the view centre, then shifted by the offset.
    pub fn image_rect(&self, view: Size, image: Size) -> Rect {
        let displayed = image * (fit_scale(view, image) * self.scale);
        Rect::from_center_size(view.center() + self.offset, displayed)
    }
}

/// Factor that fits `image` inside `view` while keeping its aspect ratio.
pub fn fit_scale(view: Size, image: Size) -> f64 {
    if image.width <= 0.0 || image.height <= 0.0 {
        return 0.0;
    }
    (view.width / image.width).min(view.height / image.height)
}

/// One step of a pinch gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchUpdate {
    /// Incremental magnification since the previous `Changed` event.
    Changed { ratio: f64 },
    Ended,
}

/// One step of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// Total translation since the drag began.
    Changed { translation: Vec2 },
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap fell inside the reference box and was recorded.
    Marked { count: usize },
    /// The tap missed the box; nothing changed.
    Outside,
    /// No photo is under review.
    NoSession,
}

/// Everything derived from one captured photo.
#[derive(Clone, Debug)]
pub struct ReviewState {
    image: Arc<CapturedImage>,
    box_size: ReferenceBoxSize,
    transform: ViewTransform,
    orientation: Option<OrientationSample>,
    marks: Vec<Point>,
}

impl ReviewState {
    /// Start reviewing `image`: box recalibrated, identity transform, no
    /// orientation yet, no marks.
    pub fn new(image: Arc<CapturedImage>, settings: &Settings) -> Result<Self> {
        let box_size = settings.box_size_for(image.height() as f64)?;
        info!(
            width = image.width(),
            height = image.height(),
            box_side = box_size.side(),
            "review session started"
        );
        Ok(Self {
            image,
            box_size,
            transform: ViewTransform::identity(),
            orientation: None,
            marks: Vec::new(),
        })
    }

    pub fn image(&self) -> &Arc<CapturedImage> {
        &self.image
    }

    pub fn box_size(&self) -> ReferenceBoxSize {
        self.box_size
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn orientation(&self) -> Option<OrientationSample> {
        self.orientation
    }

    pub fn marks(&self) -> &[Point] {
        &self.marks
    }

    pub fn plant_count(&self) -> usize {
        self.marks.len()
    }

    pub fn reference_rect(&self, view: Size) -> Rect {
        Rect::from_center_size(view.center(), self.box_size.as_size())
    }

    pub fn image_rect(&self, view: Size) -> Rect {
        self.transform.image_rect(view, self.image.size())
    }

    pub fn apply_pinch(mut self, update: PinchUpdate) -> Self {
        let t = &mut self.transform;
        match update {
            PinchUpdate::Changed { ratio } => {
                let next = t.scale * ratio;
                if !(ratio.is_finite() && ratio > 0.0) || !(next.is_finite() && next > 0.0) {
                    warn!(ratio, scale = t.scale, "ignoring pinch step");
                    return self;
                }
                t.scale = next;
            }
            PinchUpdate::Ended => {
                t.last_scale = t.scale;
                debug!(scale = t.scale, "pinch committed");
            }
        }
        self
    }

    pub fn apply_drag(mut self, update: DragUpdate) -> Self {
        let t = &mut self.transform;
        match update {
            DragUpdate::Changed { translation } => {
                t.offset = t.last_offset + translation;
            }
            DragUpdate::Ended => {
                t.last_offset = t.offset;
                debug!(dx = t.offset.dx, dy = t.offset.dy, "drag committed");
            }
        }
        self
    }

    /// Mark a plant at `location` if it lies inside the reference box of a view
    /// of size `view`. Identical taps are each counted.
    pub fn apply_tap(mut self, location: Point, view: Size) -> (Self, TapOutcome) {
        if !self.reference_rect(view).contains(location) {
            debug!(x = location.x, y = location.y, "tap outside reference box");
            return (self, TapOutcome::Outside);
        }
        self.marks.push(location);
        let count = self.marks.len();
        debug!(x = location.x, y = location.y, count, "plant marked");
        (self, TapOutcome::Marked { count })
    }

    /// Store the latest sensor reading. An absent reading replaces a present one.
    pub fn with_orientation(mut self, sample: Option<OrientationSample>) -> Self {
        self.orientation = sample;
        self
    }

    /// Back to identity pan/zoom. Marks are kept.
    pub fn reset_view(mut self) -> Self {
        self.transform = ViewTransform::identity();
        self
    }
}

/// Per-photo lifecycle: nothing captured yet, or one photo under review.
#[derive(Clone, Debug, Default)]
pub enum Session {
    #[default]
    Idle,
    Reviewing(ReviewState),
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    pub fn review(&self) -> Option<&ReviewState> {
        match self {
            Session::Idle => None,
            Session::Reviewing(state) => Some(state),
        }
    }

    pub fn plant_count(&self) -> usize {
        self.review().map_or(0, ReviewState::plant_count)
    }

    /// Handle the end of the capture flow. A delivered photo replaces the whole
    /// session; a cancelled capture (`None`) leaves it untouched. Returns whether
    /// a new session began. On error the current session is kept.
    pub fn on_capture_finished(
        &mut self,
        image: Option<CapturedImage>,
        settings: &Settings,
    ) -> Result<bool> {
        let Some(image) = image else {
            debug!(idle = self.is_idle(), "capture cancelled");
            return Ok(false);
        };
        let next = ReviewState::new(Arc::new(image), settings)?;
        *self = Session::Reviewing(next);
        Ok(true)
    }

    pub fn apply_pinch(self, update: PinchUpdate) -> Self {
        self.map_review(|s| s.apply_pinch(update))
    }

    pub fn apply_drag(self, update: DragUpdate) -> Self {
        self.map_review(|s| s.apply_drag(update))
    }

    pub fn apply_tap(self, location: Point, view: Size) -> (Self, TapOutcome) {
        match self {
            Session::Idle => {
                warn!("tap with no photo under review");
                (Session::Idle, TapOutcome::NoSession)
            }
            Session::Reviewing(state) => {
                let (state, outcome) = state.apply_tap(location, view);
                (Session::Reviewing(state), outcome)
            }
        }
    }

    pub fn with_orientation(self, sample: Option<OrientationSample>) -> Self {
        self.map_review(|s| s.with_orientation(sample))
    }

    pub fn reset_view(self) -> Self {
        self.map_review(ReviewState::reset_view)
    }

    fn map_review(self, f: impl FnOnce(ReviewState) -> ReviewState) -> Self {
        match self {
            Session::Idle => Session::Idle,
            Session::Reviewing(state) => Session::Reviewing(f(state)),
        }
    }
}
