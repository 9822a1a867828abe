use image::{Rgb, RgbImage, Rgba, RgbaImage};
use spotcount_core::{Raster, Stage};
use spotcount_io::{read_raster, save_stage};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_read_colour_png_as_greyscale() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("colour.png");
    let mut img = RgbImage::new(3, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(2, 0, Rgb([0, 0, 255]));
    img.save(&path).unwrap();

    let raster = read_raster(&path).unwrap();
    assert_eq!(raster.dimensions(), (3, 2));
    // 255 * 0.299, 255 * 0.587, 255 * 0.114 truncated.
    assert_eq!(raster.get(0, 0), 76);
    assert_eq!(raster.get(1, 0), 149);
    assert_eq!(raster.get(2, 0), 29);
    assert_eq!(raster.get(0, 1), 0);
}

#[test]
fn test_alpha_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("alpha.png");
    let mut img = RgbaImage::new(1, 1);
    img.put_pixel(0, 0, Rgba([200, 200, 200, 0]));
    img.save(&path).unwrap();

    assert_eq!(read_raster(&path).unwrap().get(0, 0), 200);
}

#[test]
fn test_saved_stage_reads_back_unchanged() {
    let dir = tempdir().unwrap();
    let raster = Raster::from_fn(9, 7, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 });
    let path = save_stage(
        &raster,
        Path::new("inputs/board.bmp"),
        dir.path(),
        Stage::SpotDetected,
    )
    .unwrap();
    assert!(path.ends_with("board_SD.png"));
    assert_eq!(read_raster(&path).unwrap(), raster);
}
