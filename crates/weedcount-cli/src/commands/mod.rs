pub mod box_size;
pub mod config;
pub mod count;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use weedcount_core::geometry::{Point, Size};
use weedcount_core::settings::Settings;

/// Read settings from a TOML file, or fall back to defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = if let Some(path) = path {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str::<Settings>(&contents).context("Invalid settings file")?
    } else {
        Settings::default()
    };
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Parse `WIDTHxHEIGHT`, e.g. `390x844`.
pub fn parse_size(s: &str) -> std::result::Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok(Size::new(width, height))
}

/// Parse `X,Y` in view points.
pub fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x in '{s}'"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y in '{s}'"))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("point must be finite, got '{s}'"));
    }
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("390x844").unwrap(), Size::new(390.0, 844.0));
        assert_eq!(parse_size("12.5X3").unwrap(), Size::new(12.5, 3.0));
        assert!(parse_size("390").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("ax10").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,-2.5").unwrap(), Point::new(10.0, -2.5));
        assert_eq!(parse_point(" 1 , 2 ").unwrap(), Point::new(1.0, 2.0));
        assert!(parse_point("10;2").is_err());
        assert!(parse_point("inf,2").is_err());
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weedcount.toml");
        std::fs::write(&path, "[calibration]\nassumed_distance_m = 2.0\n").unwrap();
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.calibration.assumed_distance_m, 2.0);
    }

    #[test]
    fn test_load_settings_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weedcount.toml");
        std::fs::write(&path, "[optics]\nfocal_length_mm = 0.0\n").unwrap();
        assert!(load_settings(Some(&path)).is_err());
        assert!(load_settings(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_settings_defaults_without_file() {
        assert_eq!(load_settings(None).unwrap(), Settings::default());
    }
}
