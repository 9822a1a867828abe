//! Threshold-difference edge detection.
//!
//! A pixel is an edge when its intensity differs from any in-bounds
//! Von Neumann neighbour by at least `epsilon`. Border and corner pixels
//! use the reduced stencil that remains inside the raster.

use spotcount_core::{Coord, Raster, EDGE, NO_EDGE, VON_NEUMANN};

/// Binary edge detection pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDetector {
    epsilon: u8,
}

impl EdgeDetector {
    /// Creates a detector with the given threshold.
    #[must_use]
    pub fn new(epsilon: u8) -> Self {
        Self { epsilon }
    }

    /// Edge threshold.
    #[must_use]
    pub fn epsilon(&self) -> u8 {
        self.epsilon
    }

    /// Classifies a single pixel.
    #[inline]
    #[must_use]
    pub fn is_edge(&self, image: &Raster, x: usize, y: usize) -> bool {
        let (width, height) = image.dimensions();
        let center = Coord::new(x, y);
        let intensity = image.at(center);
        VON_NEUMANN
            .iter()
            .filter(|offset| !offset.is_center())
            .filter_map(|&offset| center.checked_offset(offset, width, height))
            .any(|neighbour| intensity.abs_diff(image.at(neighbour)) >= self.epsilon)
    }

    /// Returns a raster holding [`EDGE`] for edge pixels and [`NO_EDGE`]
    /// elsewhere.
    #[must_use]
    pub fn detect(&self, image: &Raster) -> Raster {
        Raster::from_fn(image.width(), image.height(), |x, y| {
            if self.is_edge(image, x, y) {
                EDGE
            } else {
                NO_EDGE
            }
        })
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image() -> Raster {
        // Left half 10, right half 200.
        Raster::from_fn(8, 6, |x, _| if x < 4 { 10 } else { 200 })
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let image = Raster::filled(7, 5, 123);
        for epsilon in [1, 50, 255] {
            assert!(EdgeDetector::new(epsilon).detect(&image).all_equal(NO_EDGE));
        }
    }

    #[test]
    fn test_step_edge_marks_both_sides() {
        let edges = EdgeDetector::new(100).detect(&step_image());
        for y in 0..6 {
            assert_eq!(edges.get(3, y), EDGE);
            assert_eq!(edges.get(4, y), EDGE);
            assert_eq!(edges.get(2, y), NO_EDGE);
            assert_eq!(edges.get(5, y), NO_EDGE);
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let image = step_image();
        assert_eq!(EdgeDetector::new(190).detect(&image).get(3, 0), EDGE);
        assert_eq!(EdgeDetector::new(191).detect(&image).get(3, 0), NO_EDGE);
    }

    #[test]
    fn test_zero_epsilon_marks_everything() {
        let image = Raster::filled(4, 4, 9);
        assert!(EdgeDetector::new(0).detect(&image).all_equal(EDGE));
    }

    #[test]
    fn test_corner_uses_reduced_stencil() {
        let mut image = Raster::filled(5, 5, 0);
        image.set(1, 1, 255);
        let edges = EdgeDetector::new(10).detect(&image);
        // (0,0) only sees (1,0) and (0,1), both 0.
        assert_eq!(edges.get(0, 0), NO_EDGE);
        assert_eq!(edges.get(1, 0), EDGE);
        assert_eq!(edges.get(0, 1), EDGE);
    }

    #[test]
    fn test_monotonic_in_epsilon() {
        let image = Raster::from_fn(12, 12, |x, y| ((x * 37 + y * 91) % 256) as u8);
        let mut previous = EdgeDetector::new(0).detect(&image);
        for epsilon in (8u8..=248).step_by(8) {
            let edges = EdgeDetector::new(epsilon).detect(&image);
            for (before, after) in previous.pixels().iter().zip(edges.pixels()) {
                assert!(!(*before == NO_EDGE && *after == EDGE));
            }
            previous = edges;
        }
    }
}
