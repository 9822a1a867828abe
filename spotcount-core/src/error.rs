//! Error types for spotcount-core.

use thiserror::Error;

/// Result type alias for spotcount operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for spotcount operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Radius outside the supported ring-template range.
    #[error("radius {radius} out of range (supported: {min}..={max})")]
    RadiusOutOfRange { radius: u32, min: u32, max: u32 },

    /// Lower radius bound exceeds the upper bound.
    #[error("invalid radius range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRadiusRange { lower: u32, upper: u32 },

    /// Two rasters that must share dimensions do not.
    #[error("raster shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Pixel buffer length does not match the declared dimensions.
    #[error("invalid raster dimensions: {width}x{height} does not match {len} pixels")]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
}

impl Error {
    /// Builds a [`Error::RadiusOutOfRange`] for the supported template range.
    #[must_use]
    pub fn radius_out_of_range(radius: u32) -> Self {
        Self::RadiusOutOfRange {
            radius,
            min: crate::MIN_RADIUS,
            max: crate::MAX_RADIUS,
        }
    }
}
