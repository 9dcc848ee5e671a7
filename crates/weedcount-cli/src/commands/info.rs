use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use weedcount_core::capture::image_dimensions;

use super::load_settings;

#[derive(Args)]
pub struct InfoArgs {
    /// Input photo
    pub file: PathBuf,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let (width, height) = image_dimensions(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let box_size = settings.box_size_for(height as f64)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", width, height);
    println!("Megapixels:  {:.1}", (width as f64 * height as f64) / 1.0e6);
    println!(
        "Box:         {:.1} px ({} m at {} m)",
        box_size.side(),
        settings.calibration.reference_size_m,
        settings.calibration.assumed_distance_m
    );
    let coverage = box_size.side() / height as f64;
    println!("Box/height:  {:.1}%", coverage * 100.0);

    Ok(())
}
