use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use weedcount_core::capture::CapturedImage;
use weedcount_core::controller::ReviewController;
use weedcount_core::geometry::{Point, Rect, Size};
use weedcount_core::orientation::{OrientationSample, UnavailableOrientation};
use weedcount_core::readout::{format_orientation, format_plant_count};
use weedcount_core::session::TapOutcome;

use super::{load_settings, parse_point, parse_size};

/// Largest photo `--size` may describe. The blank frame is allocated in full.
const MAX_SYNTHETIC_PIXELS: u64 = 200_000_000;

#[derive(Args)]
pub struct CountArgs {
    /// Photo under review
    #[arg(long, conflicts_with = "size", required_unless_present = "size")]
    pub image: Option<PathBuf>,

    /// Photo size as WIDTHxHEIGHT, instead of loading a file
    #[arg(long, value_parser = parse_size)]
    pub size: Option<Size>,

    /// Size of the view the taps were made in, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub view: Size,

    /// Tap location in view points as X,Y (repeatable)
    #[arg(long = "tap", value_parser = parse_point)]
    pub taps: Vec<Point>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Result of replaying taps on one photo.
pub struct Replay {
    pub box_side: f64,
    pub reference: Rect,
    pub outcomes: Vec<(Point, TapOutcome)>,
    pub plant_count: usize,
    pub orientation: Option<OrientationSample>,
}

pub fn run(args: &CountArgs) -> Result<()> {
    let replay = replay(args)?;

    let r = replay.reference;
    println!(
        "Reference box: {:.1} px, view {}x{}, box spans ({:.1}, {:.1})-({:.1}, {:.1})",
        replay.box_side,
        args.view.width,
        args.view.height,
        r.min.x,
        r.min.y,
        r.max().x,
        r.max().y
    );
    for (tap, outcome) in &replay.outcomes {
        match outcome {
            TapOutcome::Marked { count } => {
                println!("tap ({}, {}): marked #{count}", tap.x, tap.y)
            }
            TapOutcome::Outside => println!("tap ({}, {}): outside box", tap.x, tap.y),
            TapOutcome::NoSession => {}
        }
    }
    println!("{}", format_plant_count(replay.plant_count));
    println!("{}", format_orientation(replay.orientation));
    Ok(())
}

/// Open a review session on the photo and feed it every tap in order.
pub fn replay(args: &CountArgs) -> Result<Replay> {
    let settings = load_settings(args.config.as_deref())?;
    let image = load_photo(args)?;

    let mut controller = ReviewController::new(Arc::new(UnavailableOrientation), settings)?;
    controller.on_capture_finished(Some(image))?;

    let (box_side, reference) = match controller.session().review() {
        Some(review) => (review.box_size().side(), review.reference_rect(args.view)),
        None => anyhow::bail!("No photo under review"),
    };

    let mut outcomes = Vec::with_capacity(args.taps.len());
    for tap in &args.taps {
        let outcome = controller.tap(*tap, args.view);
        if outcome == TapOutcome::NoSession {
            anyhow::bail!("No photo under review");
        }
        outcomes.push((*tap, outcome));
    }

    controller.pump();
    let replay = Replay {
        box_side,
        reference,
        outcomes,
        plant_count: controller.session().plant_count(),
        orientation: controller.session().review().and_then(|r| r.orientation()),
    };
    controller.end();
    Ok(replay)
}

fn load_photo(args: &CountArgs) -> Result<CapturedImage> {
    if let Some(ref path) = args.image {
        return CapturedImage::open(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }
    let size = args
        .size
        .context("Either --image or --size is required")?;
    let width = pixel_extent(size.width, "width")?;
    let height = pixel_extent(size.height, "height")?;

    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count > MAX_SYNTHETIC_PIXELS {
        anyhow::bail!(
            "--size {width}x{height} is {pixel_count} pixels, more than the {MAX_SYNTHETIC_PIXELS} allowed"
        );
    }
    let bytes = usize::try_from(pixel_count * 4).context("--size does not fit in memory")?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(bytes)
        .with_context(|| format!("Cannot allocate a {width}x{height} frame"))?;
    pixels.resize(bytes, 0u8);
    CapturedImage::from_rgba(width, height, pixels).context("Invalid --size")
}

/// Round a `--size` extent to whole pixels, rejecting anything outside `1..=u32::MAX`.
fn pixel_extent(value: f64, what: &str) -> Result<u32> {
    let rounded = value.round();
    if !(rounded >= 1.0 && rounded <= f64::from(u32::MAX)) {
        anyhow::bail!("--size {what} {value} is out of range");
    }
    Ok(rounded as u32)
}
