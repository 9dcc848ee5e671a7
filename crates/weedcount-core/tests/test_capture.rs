use image::{Rgb, RgbImage};

use weedcount_core::capture::{image_dimensions, CapturedImage};
use weedcount_core::error::WeedCountError;

#[test]
fn test_from_rgba_checks_buffer_length() {
    let err = CapturedImage::from_rgba(4, 4, vec![0u8; 10]).unwrap_err();
    assert!(matches!(
        err,
        WeedCountError::InvalidDimensions {
            width: 4,
            height: 4
        }
    ));
}

#[test]
fn test_zero_sized_image_rejected() {
    assert!(CapturedImage::from_rgba(0, 5, Vec::new()).is_err());
}

#[test]
fn test_from_rgba_keeps_pixels() {
    let pixels: Vec<u8> = (0..2 * 3 * 4).map(|v| v as u8).collect();
    let img = CapturedImage::from_rgba(2, 3, pixels.clone()).unwrap();
    assert_eq!(img.width(), 2);
    assert_eq!(img.height(), 3);
    assert_eq!(img.size().height, 3.0);
    assert_eq!(img.rgba(), pixels.as_slice());
}

#[test]
fn test_open_png_converts_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ground.png");
    RgbImage::from_pixel(6, 9, Rgb([10, 200, 30]))
        .save(&path)
        .unwrap();

    let img = CapturedImage::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (6, 9));
    assert_eq!(&img.rgba()[..4], &[10, 200, 30, 255]);
    assert_eq!(image_dimensions(&path).unwrap(), (6, 9));
}

#[test]
fn test_open_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CapturedImage::open(&dir.path().join("nope.png")).is_err());
}
