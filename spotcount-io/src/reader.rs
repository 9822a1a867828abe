//! Image decoding into greyscale rasters.

use crate::greyscale::to_greyscale;
use crate::{Error, Result};
use log::debug;
use spotcount_core::Raster;
use std::path::Path;

/// Decodes the image at `path` and converts it to greyscale.
///
/// Any format supported by the `image` crate is accepted.
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `path` is not a regular file, or the
/// decoder error if the file is not a readable image.
pub fn read_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::InvalidPath(path.display().to_string()));
    }
    let image = image::open(path)?;
    let raster = to_greyscale(&image);
    debug!(
        "decoded {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_raster("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_raster(dir.path()),
            Err(Error::InvalidPath(_))
        ));
    }

    #[test]
    fn test_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"plain text").unwrap();
        assert!(matches!(read_raster(&path), Err(Error::Image(_))));
    }
}
