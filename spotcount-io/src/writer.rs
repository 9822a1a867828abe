//! Stage image and spot-count output.

use crate::{Error, Result};
use image::{GrayImage, ImageFormat};
use log::debug;
use spotcount_core::{Raster, Stage};
use std::fs;
use std::path::{Path, PathBuf};

/// File-name suffix for the claim overlay image.
pub const CLAIMS_SUFFIX: &str = "_claims";

/// Converts a raster to an 8-bit luma image.
///
/// # Errors
/// Returns [`Error::InvalidFormat`] if a dimension does not fit in `u32`.
pub fn raster_to_image(raster: &Raster) -> Result<GrayImage> {
    let width = u32::try_from(raster.width())
        .map_err(|_| Error::InvalidFormat(format!("width {} too large", raster.width())))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| Error::InvalidFormat(format!("height {} too large", raster.height())))?;
    GrayImage::from_raw(width, height, raster.pixels().to_vec())
        .ok_or_else(|| Error::InvalidFormat(format!("buffer does not fit {width}x{height}")))
}

/// Writes `raster` as a greyscale PNG, creating parent directories.
///
/// # Errors
/// Returns I/O or encoder errors.
pub fn write_png<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    raster_to_image(raster)?.save_with_format(path, ImageFormat::Png)?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn file_stem(input: &Path) -> Result<&str> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidPath(input.display().to_string()))
}

/// Builds `<out_dir>/<input stem><suffix>.png`.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `input` has no UTF-8 file stem.
pub fn suffixed_output_path(input: &Path, out_dir: &Path, suffix: &str) -> Result<PathBuf> {
    Ok(out_dir.join(format!("{}{suffix}.png", file_stem(input)?)))
}

/// Output path for an image saved at `stage`.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `input` has no UTF-8 file stem.
pub fn stage_output_path(input: &Path, out_dir: &Path, stage: Stage) -> Result<PathBuf> {
    suffixed_output_path(input, out_dir, stage.suffix())
}

/// Saves `raster` under the stage-suffixed name and returns the path.
///
/// # Errors
/// Returns path, I/O or encoder errors.
pub fn save_stage(raster: &Raster, input: &Path, out_dir: &Path, stage: Stage) -> Result<PathBuf> {
    let path = stage_output_path(input, out_dir, stage)?;
    write_png(raster, &path)?;
    Ok(path)
}

/// Writes the decimal spot count to `<out_dir>/<input stem>.out`.
///
/// # Errors
/// Returns path or I/O errors.
pub fn write_spot_count(input: &Path, out_dir: &Path, count: usize) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.out", file_stem(input)?));
    fs::create_dir_all(out_dir)?;
    fs::write(&path, count.to_string())?;
    Ok(path)
}
