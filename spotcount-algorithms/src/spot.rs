//! Ring-template spot detection.
//!
//! Key characteristics:
//! - Radii are scanned strictly ascending; within a radius, x is the outer
//!   loop and y the inner loop.
//! - Candidate anchors use a margin of `radius + 1`; the evaluated window
//!   is the `(2r+1)` block whose top-left corner is `(x-r-1, y-r-1)`.
//! - A window with no edge pixels advances y by the window side before the
//!   regular increment, so the skipped anchors are never evaluated.
//! - A match registers only if its anchor is unclaimed; registering claims
//!   the whole window, which suppresses later overlapping candidates.

use crate::mask::{RingMask, RingMaskLibrary};
use log::{debug, trace};
use spotcount_core::{Coord, RadiusRange, Raster, Result, EDGE, NO_EDGE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-run record of pixels already attributed to a spot.
///
/// Cells only ever flip from unclaimed to claimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimGrid {
    width: usize,
    height: usize,
    claimed: Vec<bool>,
}

impl ClaimGrid {
    /// Creates an all-unclaimed grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            claimed: vec![false; width * height],
        }
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns true if `(x, y)` belongs to a registered spot.
    #[inline]
    #[must_use]
    pub fn is_claimed(&self, x: usize, y: usize) -> bool {
        self.claimed[y * self.width + x]
    }

    /// Claims the `side` x `side` block with top-left corner `(x0, y0)`.
    pub fn claim_block(&mut self, x0: usize, y0: usize, side: usize) {
        for y in y0..y0 + side {
            let start = y * self.width + x0;
            self.claimed[start..start + side].fill(true);
        }
    }

    /// Number of claimed pixels.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.claimed.iter().filter(|&&c| c).count()
    }

    /// Renders claimed pixels as [`EDGE`] and the rest as [`NO_EDGE`].
    #[must_use]
    pub fn render(&self) -> Raster {
        Raster::from_fn(self.width, self.height, |x, y| {
            if self.is_claimed(x, y) {
                EDGE
            } else {
                NO_EDGE
            }
        })
    }
}

/// A registered spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spot {
    /// Scan position whose claim state gated the registration.
    pub anchor: Coord,
    /// Top-left corner of the matched window.
    pub origin: Coord,
    /// Radius of the matching template.
    pub radius: u32,
    /// Sum of absolute differences against the template.
    pub sad: u32,
}

impl Spot {
    /// Side length of the matched window.
    #[must_use]
    pub fn side(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Center pixel of the matched window.
    #[must_use]
    pub fn center(&self) -> Coord {
        let r = self.radius as usize;
        Coord::new(self.origin.x + r, self.origin.y + r)
    }
}

/// Counters for one radius pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadiusPass {
    /// Template radius.
    pub radius: u32,
    /// Windows whose SAD was computed.
    pub windows_evaluated: usize,
    /// Windows rejected for containing no edge pixels.
    pub fast_rejects: usize,
    /// Matches dropped because their anchor was already claimed.
    pub suppressed: usize,
    /// Spots registered during this pass.
    pub spots: usize,
}

/// Scan counters for a detection run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanStatistics {
    /// One entry per scanned radius, ascending.
    pub passes: Vec<RadiusPass>,
}

impl ScanStatistics {
    /// Total windows whose SAD was computed.
    #[must_use]
    pub fn windows_evaluated(&self) -> usize {
        self.passes.iter().map(|p| p.windows_evaluated).sum()
    }

    /// Total fast rejects.
    #[must_use]
    pub fn fast_rejects(&self) -> usize {
        self.passes.iter().map(|p| p.fast_rejects).sum()
    }

    /// Total suppressed matches.
    #[must_use]
    pub fn suppressed(&self) -> usize {
        self.passes.iter().map(|p| p.suppressed).sum()
    }
}

/// Output of a detection run.
#[derive(Clone, Debug)]
pub struct SpotDetection {
    /// Background everywhere except matched windows, which hold the raw
    /// edge-raster pixels.
    pub spot_map: Raster,
    /// Number of registered spots.
    pub spot_count: usize,
    /// Registered spots in registration order.
    pub spots: Vec<Spot>,
    /// Final claim state.
    pub claims: ClaimGrid,
    /// Scan counters.
    pub statistics: ScanStatistics,
}

/// Mutable state of one detection run.
struct ScanState<'a> {
    edges: &'a Raster,
    spot_map: Raster,
    claims: ClaimGrid,
    spots: Vec<Spot>,
}

impl<'a> ScanState<'a> {
    fn new(edges: &'a Raster) -> Self {
        let (width, height) = edges.dimensions();
        Self {
            edges,
            spot_map: Raster::new(width, height),
            claims: ClaimGrid::new(width, height),
            spots: Vec::new(),
        }
    }

    fn window_is_empty(&self, x0: usize, y0: usize, side: usize) -> bool {
        (x0..x0 + side).all(|x| (y0..y0 + side).all(|y| self.edges.get(x, y) == NO_EDGE))
    }

    fn window_sad(&self, mask: &RingMask, x0: usize, y0: usize) -> u32 {
        let side = mask.side();
        let mut sad = 0u32;
        for i in 0..side {
            for j in 0..side {
                let pixel = self.edges.get(x0 + i, y0 + j);
                sad += u32::from(pixel.abs_diff(mask.get(i, j)));
            }
        }
        sad
    }

    fn register(&mut self, spot: Spot) -> Result<()> {
        let side = spot.side();
        self.spot_map
            .copy_block_from(self.edges, spot.origin.x, spot.origin.y, side)?;
        self.claims.claim_block(spot.origin.x, spot.origin.y, side);
        trace!(
            "spot at anchor ({}, {}) radius {} sad {}",
            spot.anchor.x,
            spot.anchor.y,
            spot.radius,
            spot.sad
        );
        self.spots.push(spot);
        Ok(())
    }

    fn scan(&mut self, mask: &RingMask) -> Result<RadiusPass> {
        let radius = mask.radius();
        let r = radius as usize;
        let side = mask.side();
        let threshold = mask.param().sad_threshold;
        let (width, height) = self.edges.dimensions();
        let mut pass = RadiusPass {
            radius,
            ..RadiusPass::default()
        };

        for x in r + 1..width.saturating_sub(r) {
            let mut y = r + 1;
            while y < height.saturating_sub(r) {
                let x0 = x - r - 1;
                let y0 = y - r - 1;

                if self.window_is_empty(x0, y0, side) {
                    pass.fast_rejects += 1;
                    y += side + 1;
                    continue;
                }

                pass.windows_evaluated += 1;
                let sad = self.window_sad(mask, x0, y0);
                if sad < threshold {
                    if self.claims.is_claimed(x, y) {
                        pass.suppressed += 1;
                    } else {
                        pass.spots += 1;
                        self.register(Spot {
                            anchor: Coord::new(x, y),
                            origin: Coord::new(x0, y0),
                            radius,
                            sad,
                        })?;
                    }
                }
                y += 1;
            }
        }
        Ok(pass)
    }
}

/// Multi-radius ring-template spot detector.
#[derive(Clone, Debug)]
pub struct SpotDetector {
    radii: RadiusRange,
    masks: RingMaskLibrary,
}

impl SpotDetector {
    /// Creates a detector scanning `radii`.
    #[must_use]
    pub fn new(radii: RadiusRange) -> Self {
        Self {
            radii,
            masks: RingMaskLibrary::new(),
        }
    }

    /// Creates a detector from raw radius bounds.
    ///
    /// # Errors
    /// Returns `RadiusOutOfRange` or `InvalidRadiusRange` before any
    /// scanning can happen.
    pub fn from_bounds(lower: u32, upper: u32) -> Result<Self> {
        Ok(Self::new(RadiusRange::new(lower, upper)?))
    }

    /// Scanned radius range.
    #[must_use]
    pub fn radii(&self) -> RadiusRange {
        self.radii
    }

    /// Scans `edges` and counts non-overlapping ring matches.
    ///
    /// Each call owns a fresh claim grid, so detectors can be shared
    /// between threads.
    ///
    /// # Errors
    /// Returns `RadiusOutOfRange` if a template is missing for a scanned
    /// radius; this is checked for every radius before scanning starts.
    /// Returns `ShapeMismatch` if the result raster cannot take a window
    /// copied from `edges`.
    pub fn detect(&self, edges: &Raster) -> Result<SpotDetection> {
        let masks = self
            .radii
            .iter()
            .map(|radius| self.masks.get(radius))
            .collect::<Result<Vec<_>>>()?;

        let mut state = ScanState::new(edges);
        let mut statistics = ScanStatistics::default();
        for mask in masks {
            let pass = state.scan(mask)?;
            debug!(
                "radius {}: {} windows evaluated, {} fast rejects, {} suppressed, {} spots",
                pass.radius, pass.windows_evaluated, pass.fast_rejects, pass.suppressed, pass.spots
            );
            statistics.passes.push(pass);
        }

        let ScanState {
            spot_map,
            claims,
            spots,
            ..
        } = state;
        Ok(SpotDetection {
            spot_map,
            spot_count: spots.len(),
            spots,
            claims,
            statistics,
        })
    }
}

impl Default for SpotDetector {
    fn default() -> Self {
        Self::new(RadiusRange::default())
    }
}
