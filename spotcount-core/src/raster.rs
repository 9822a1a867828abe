//! Single-channel intensity raster shared by every pipeline stage.
//!
//! A greyscale image has equal red, green and blue components per pixel,
//! so one `u8` channel carries the whole intensity. Pixels are stored
//! row-major. Stages borrow their input and allocate a fresh output.

use crate::coord::Coord;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Edge-raster value for pixels that are not on an edge.
pub const NO_EDGE: u8 = 0;
/// Edge-raster value for pixels on an edge.
pub const EDGE: u8 = 255;
/// Result-raster value outside detected spots.
pub const BACKGROUND: u8 = 0;

/// 2D grid of 8-bit intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRaster"))]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRaster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRaster> for Raster {
    type Error = Error;

    fn try_from(raw: RawRaster) -> Result<Self> {
        Self::from_vec(raw.width, raw.height, raw.pixels)
    }
}

impl Raster {
    /// Creates a raster filled with [`BACKGROUND`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, BACKGROUND)
    }

    /// Creates a raster where every pixel has `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Wraps a row-major pixel buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> u8,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Raster width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns true if `(x, y)` lies inside the raster.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Intensity at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside raster");
        self.pixels[y * self.width + x]
    }

    /// Intensity at `coord`.
    #[inline]
    #[must_use]
    pub fn at(&self, coord: Coord) -> u8 {
        self.get(coord.x, coord.y)
    }

    /// Sets the intensity at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside raster");
        self.pixels[y * self.width + x] = value;
    }

    /// Row-major pixel slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the raster and returns its row-major buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns true if every pixel has the same intensity.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.pixels.windows(2).all(|w| w[0] == w[1])
    }

    /// Returns true if every pixel equals `value`.
    #[must_use]
    pub fn all_equal(&self, value: u8) -> bool {
        self.pixels.iter().all(|&p| p == value)
    }

    /// Checks that `other` has the same dimensions as `self`.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] otherwise.
    pub fn ensure_same_shape(&self, other: &Raster) -> Result<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Copies the `side` x `side` block of `src` whose top-left corner is
    /// `(x0, y0)` into the same position of `self`.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `src` has other dimensions.
    ///
    /// # Panics
    /// Panics if the block leaves the rasters.
    pub fn copy_block_from(
        &mut self,
        src: &Raster,
        x0: usize,
        y0: usize,
        side: usize,
    ) -> Result<()> {
        self.ensure_same_shape(src)?;
        for y in y0..y0 + side {
            let start = y * self.width + x0;
            let src_start = y * src.width + x0;
            self.pixels[start..start + side]
                .copy_from_slice(&src.pixels[src_start..src_start + side]);
        }
        Ok(())
    }
}
