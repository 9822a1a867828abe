//! Majority-vote noise reduction.
//!
//! Each interior pixel takes the most frequent intensity among its
//! Von Neumann stencil (center, left, right, up, down). Border pixels
//! are copied unchanged.

use spotcount_core::{Coord, Raster, VON_NEUMANN};

const STENCIL_LEN: usize = VON_NEUMANN.len();

/// Frequency table that remembers the order in which values were first seen.
///
/// A hash map would lose that order, and the tie-break depends on it.
#[derive(Debug, Default)]
struct Histogram {
    entries: [(u8, u8); STENCIL_LEN],
    len: usize,
}

impl Histogram {
    fn record(&mut self, value: u8) {
        if let Some(entry) = self.entries[..self.len].iter_mut().find(|e| e.0 == value) {
            entry.1 += 1;
        } else {
            self.entries[self.len] = (value, 1);
            self.len += 1;
        }
    }

    fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.entries[..self.len].iter().copied()
    }
}

/// Picks the winning intensity for one stencil sample.
///
/// `samples[0]` must be the center pixel. A value wins if its frequency
/// strictly exceeds the current maximum, or ties it while equal to the
/// center. Among tied non-center values the first one seen stays.
#[must_use]
pub fn majority_vote(samples: &[u8; STENCIL_LEN]) -> u8 {
    let center = samples[0];
    let mut histogram = Histogram::default();
    for &value in samples {
        histogram.record(value);
    }

    let mut max_frequency = 0;
    let mut winner = center;
    for (value, frequency) in histogram.iter() {
        if frequency > max_frequency {
            max_frequency = frequency;
            winner = value;
        } else if frequency == max_frequency && value == center {
            winner = value;
        }
    }
    winner
}

/// Majority-vote smoothing pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiseReducer;

impl NoiseReducer {
    /// Creates a noise reducer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns a smoothed copy of `image`.
    #[must_use]
    pub fn reduce(&self, image: &Raster) -> Raster {
        let (width, height) = image.dimensions();
        let mut reduced = image.clone();
        if width < 3 || height < 3 {
            return reduced;
        }

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let center = Coord::new(x, y);
                let samples = VON_NEUMANN.map(|offset| image.at(center.offset_unchecked(offset)));
                reduced.set(x, y, majority_vote(&samples));
            }
        }
        reduced
    }
}
