use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use weedcount_core::calibration::Calibration;
use weedcount_core::capture::image_dimensions;
use weedcount_core::settings::Settings;

use super::load_settings;
use crate::summary::{print_calibration_summary, Subject};

#[derive(Args)]
pub struct BoxSizeArgs {
    /// Photo to read the height from
    #[arg(long, conflicts_with = "height", required_unless_present = "height")]
    pub image: Option<PathBuf>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Assumed camera-to-ground distance in metres
    #[arg(long)]
    pub distance: Option<f64>,

    /// Lens focal length in millimetres
    #[arg(long)]
    pub focal_length: Option<f64>,

    /// Sensor height in millimetres
    #[arg(long)]
    pub sensor_height: Option<f64>,

    /// Reference square side in metres
    #[arg(long)]
    pub reference_size: Option<f64>,
}

pub fn run(args: &BoxSizeArgs) -> Result<()> {
    let (subject, settings, calibration) = resolve(args)?;
    print_calibration_summary(&subject, &settings, &calibration);
    Ok(())
}

/// Settings with the flag overrides applied, and the calibration they give.
fn resolve(args: &BoxSizeArgs) -> Result<(Subject<'_>, Settings, Calibration)> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(d) = args.distance {
        settings.calibration.assumed_distance_m = d;
    }
    if let Some(f) = args.focal_length {
        settings.optics.focal_length_mm = f;
    }
    if let Some(s) = args.sensor_height {
        settings.optics.sensor_height_mm = s;
    }
    if let Some(r) = args.reference_size {
        settings.calibration.reference_size_m = r;
    }

    let (subject, height) = match (&args.image, args.height) {
        (Some(path), _) => {
            let (width, height) = image_dimensions(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (
                Subject::Image {
                    path,
                    width,
                    height,
                },
                height as f64,
            )
        }
        (None, Some(h)) => (Subject::Height(h), h),
        (None, None) => anyhow::bail!("Either --image or --height is required"),
    };

    let calibration = settings
        .calibrate_for(height)
        .context("Calibration rejected the inputs")?;
    Ok((subject, settings, calibration))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BoxSizeArgs {
        BoxSizeArgs {
            image: None,
            height: None,
            config: None,
            distance: None,
            focal_length: None,
            sensor_height: None,
            reference_size: None,
        }
    }

    #[test]
    fn test_box_from_height() {
        let a = BoxSizeArgs {
            height: Some(4000.0),
            ..args()
        };
        let (_, _, c) = resolve(&a).unwrap();
        assert!((c.real_world_height_m - 1.129_411_764_7).abs() < 1e-9);
        assert!((c.box_size.side() - 1079.5).abs() < 1e-9);
    }

    #[test]
    fn test_box_from_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        image::RgbaImage::new(80, 100).save(&path).unwrap();

        let a = BoxSizeArgs {
            image: Some(path),
            ..args()
        };
        let (subject, _, c) = resolve(&a).unwrap();
        assert!(matches!(subject, Subject::Image { width: 80, height: 100, .. }));
        assert!((c.box_size.side() - 26.9875).abs() < 1e-9);
    }

    #[test]
    fn test_overrides_apply_and_are_validated() {
        let a = BoxSizeArgs {
            height: Some(4000.0),
            distance: Some(2.0),
            ..args()
        };
        let (_, settings, c) = resolve(&a).unwrap();
        assert_eq!(settings.calibration.assumed_distance_m, 2.0);
        assert!((c.box_size.side() - 539.75).abs() < 1e-9);

        let bad = BoxSizeArgs {
            height: Some(4000.0),
            focal_length: Some(0.0),
            ..args()
        };
        assert!(resolve(&bad).is_err());
    }

    #[test]
    fn test_unreadable_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let a = BoxSizeArgs {
            image: Some(dir.path().join("missing.png")),
            ..args()
        };
        assert!(resolve(&a).is_err());
    }
}
