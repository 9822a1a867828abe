//! Ring (annulus) templates for the spot detector.
//!
//! Every supported radius has a fixed parameter triple. The template for
//! radius `r` is a `(2r+1)` square whose "on" cells satisfy
//! `(r-delta)^2 - ring_width < d^2 < (r-delta)^2 + ring_width`, which
//! traces a circle outline of radius `r - delta`.

use spotcount_core::{check_radius, Error, Result, MAX_RADIUS, MIN_RADIUS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Template value for cells on the ring.
pub const MASK_ON: u8 = 255;
/// Template value for cells off the ring.
pub const MASK_OFF: u8 = 0;

/// Template parameters for one radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskParam {
    /// Radius the parameters belong to.
    pub radius: u32,
    /// Tolerance on squared distance around the ring.
    pub ring_width: i32,
    /// Inward shift of the ring from the template edge.
    pub delta: i32,
    /// A window matches when its SAD is strictly below this.
    pub sad_threshold: u32,
}

impl MaskParam {
    const fn new(radius: u32, ring_width: i32, delta: i32, sad_threshold: u32) -> Self {
        Self {
            radius,
            ring_width,
            delta,
            sad_threshold,
        }
    }
}

const MASK_PARAMS: [MaskParam; (MAX_RADIUS - MIN_RADIUS + 1) as usize] = [
    MaskParam::new(4, 6, 0, 4800),
    MaskParam::new(5, 9, 1, 6625),
    MaskParam::new(6, 12, 1, 11000),
    MaskParam::new(7, 15, 1, 15000),
    MaskParam::new(8, 18, 1, 19000),
    MaskParam::new(9, 21, 1, 23000),
    MaskParam::new(10, 24, 2, 28000),
    MaskParam::new(11, 27, 2, 35000),
];

/// Looks up the template parameters for `radius`.
///
/// # Errors
/// Returns [`Error::RadiusOutOfRange`] for radii outside `4..=11`.
pub fn mask_param(radius: u32) -> Result<MaskParam> {
    let radius = check_radius(radius)?;
    Ok(MASK_PARAMS[(radius - MIN_RADIUS) as usize])
}

/// Square ring template of side `2 * radius + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingMask {
    param: MaskParam,
    side: usize,
    cells: Vec<u8>,
}

impl RingMask {
    /// Builds the template for `radius`.
    ///
    /// # Errors
    /// Returns [`Error::RadiusOutOfRange`] for radii outside `4..=11`.
    pub fn new(radius: u32) -> Result<Self> {
        Ok(Self::from_param(mask_param(radius)?))
    }

    /// Builds the template for a row of the parameter table.
    #[allow(clippy::cast_possible_wrap)]
    fn from_param(param: MaskParam) -> Self {
        let r = param.radius as i32;
        let side = (2 * param.radius + 1) as usize;
        let ring = (r - param.delta) * (r - param.delta);

        let mut cells = Vec::with_capacity(side * side);
        for i in 0..=2 * r {
            for j in 0..=2 * r {
                let d2 = (i - r) * (i - r) + (j - r) * (j - r);
                let on = d2 > ring - param.ring_width && d2 < ring + param.ring_width;
                cells.push(if on { MASK_ON } else { MASK_OFF });
            }
        }

        Self { param, side, cells }
    }

    /// Template radius.
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.param.radius
    }

    /// Template parameters.
    #[must_use]
    pub fn param(&self) -> &MaskParam {
        &self.param
    }

    /// Side length (`2 * radius + 1`).
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell value at column offset `i`, row offset `j`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[i * self.side + j]
    }

    /// Number of "on" cells.
    #[must_use]
    pub fn on_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == MASK_ON).count()
    }

    /// Renders the template as rows of `*` (on) and `-` (off).
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.side * (self.side + 1));
        for i in 0..self.side {
            for j in 0..self.side {
                out.push(if self.get(i, j) == MASK_ON { '*' } else { '-' });
            }
            out.push('\n');
        }
        out
    }
}

/// Precomputed templates for every supported radius.
#[derive(Clone, Debug)]
pub struct RingMaskLibrary {
    masks: Vec<RingMask>,
}

impl RingMaskLibrary {
    /// Builds all eight templates.
    #[must_use]
    pub fn new() -> Self {
        let masks = MASK_PARAMS.iter().copied().map(RingMask::from_param).collect();
        Self { masks }
    }

    /// Template for `radius`.
    ///
    /// # Errors
    /// Returns [`Error::RadiusOutOfRange`] for radii outside `4..=11`.
    pub fn get(&self, radius: u32) -> Result<&RingMask> {
        let radius = check_radius(radius)?;
        self.masks
            .get((radius - MIN_RADIUS) as usize)
            .ok_or_else(|| Error::radius_out_of_range(radius))
    }

    /// Iterates templates in ascending radius order.
    pub fn iter(&self) -> impl Iterator<Item = &RingMask> {
        self.masks.iter()
    }
}

impl Default for RingMaskLibrary {
    fn default() -> Self {
        Self::new()
    }
}
