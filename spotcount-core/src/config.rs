//! Pipeline configuration and stage naming.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest radius with a ring template.
pub const MIN_RADIUS: u32 = 4;
/// Largest radius with a ring template.
pub const MAX_RADIUS: u32 = 11;

/// Checks that `radius` has a ring template.
///
/// # Errors
/// Returns [`Error::RadiusOutOfRange`] for radii outside `4..=11`.
pub fn check_radius(radius: u32) -> Result<u32> {
    if (MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
        Ok(radius)
    } else {
        Err(Error::radius_out_of_range(radius))
    }
}

/// Inclusive range of spot radii scanned by the detector.
///
/// Always satisfies `4 <= lower <= upper <= 11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRadiusRange"))]
pub struct RadiusRange {
    lower: u32,
    upper: u32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRadiusRange {
    lower: u32,
    upper: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRadiusRange> for RadiusRange {
    type Error = Error;

    fn try_from(raw: RawRadiusRange) -> Result<Self> {
        Self::new(raw.lower, raw.upper)
    }
}

impl RadiusRange {
    /// Creates a validated radius range.
    ///
    /// # Errors
    /// Returns [`Error::RadiusOutOfRange`] if either bound lies outside
    /// `4..=11`, or [`Error::InvalidRadiusRange`] if `lower > upper`.
    pub fn new(lower: u32, upper: u32) -> Result<Self> {
        check_radius(lower)?;
        check_radius(upper)?;
        if lower > upper {
            return Err(Error::InvalidRadiusRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Range containing a single radius.
    ///
    /// # Errors
    /// Returns [`Error::RadiusOutOfRange`] if `radius` lies outside `4..=11`.
    pub fn single(radius: u32) -> Result<Self> {
        Self::new(radius, radius)
    }

    /// Every supported radius.
    #[must_use]
    pub fn full() -> Self {
        Self {
            lower: MIN_RADIUS,
            upper: MAX_RADIUS,
        }
    }

    /// Smallest radius scanned.
    #[must_use]
    pub fn lower(&self) -> u32 {
        self.lower
    }

    /// Largest radius scanned.
    #[must_use]
    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Radii in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.lower..=self.upper
    }
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self {
            lower: MIN_RADIUS,
            upper: MIN_RADIUS,
        }
    }
}

/// Configuration for a full greyscale-to-spot-count run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// Minimum intensity difference that marks a pixel as an edge.
    pub epsilon: u8,
    /// Radii scanned by the spot detector.
    pub radii: RadiusRange,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            epsilon: 50,
            radii: RadiusRange::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edge threshold.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: u8) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the scanned radius range.
    #[must_use]
    pub fn with_radii(mut self, radii: RadiusRange) -> Self {
        self.radii = radii;
        self
    }

    /// Sets the scanned radius range from raw bounds.
    ///
    /// # Errors
    /// Propagates [`RadiusRange::new`] validation failures.
    pub fn with_bounds(self, lower: u32, upper: u32) -> Result<Self> {
        Ok(self.with_radii(RadiusRange::new(lower, upper)?))
    }

    /// Re-checks invariants.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        RadiusRange::new(self.radii.lower, self.radii.upper).map(|_| ())
    }
}

/// Processing stage of an image, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stage {
    /// Decoded and converted to a single intensity channel.
    Greyscale,
    /// After the majority-vote smoothing pass.
    NoiseReduced,
    /// Binary edge raster.
    EdgeDetected,
    /// Result raster with matched spot windows.
    SpotDetected,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [
        Stage::Greyscale,
        Stage::NoiseReduced,
        Stage::EdgeDetected,
        Stage::SpotDetected,
    ];

    /// File-name suffix for images saved at this stage.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Stage::Greyscale => "_GS",
            Stage::NoiseReduced => "_NR",
            Stage::EdgeDetected => "_ED",
            Stage::SpotDetected => "_SD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_range_bounds() {
        assert!(RadiusRange::new(4, 11).is_ok());
        assert_eq!(
            RadiusRange::new(3, 5),
            Err(Error::RadiusOutOfRange {
                radius: 3,
                min: 4,
                max: 11
            })
        );
        assert!(matches!(
            RadiusRange::new(4, 12),
            Err(Error::RadiusOutOfRange { radius: 12, .. })
        ));
        assert_eq!(
            RadiusRange::new(7, 5),
            Err(Error::InvalidRadiusRange { lower: 7, upper: 5 })
        );
    }

    #[test]
    fn test_radius_range_iterates_ascending() {
        let radii: Vec<_> = RadiusRange::new(5, 8).unwrap().iter().collect();
        assert_eq!(radii, vec![5, 6, 7, 8]);
        assert_eq!(RadiusRange::full().iter().count(), 8);
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = PipelineConfig::new()
            .with_epsilon(30)
            .with_bounds(5, 9)
            .unwrap();
        assert_eq!(config.epsilon, 30);
        assert_eq!(config.radii.lower(), 5);
        assert_eq!(config.radii.upper(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.epsilon, 50);
        assert_eq!(config.radii, RadiusRange::single(4).unwrap());
    }

    #[test]
    fn test_stage_suffixes() {
        let suffixes: Vec<_> = Stage::ALL.iter().map(Stage::suffix).collect();
        assert_eq!(suffixes, vec!["_GS", "_NR", "_ED", "_SD"]);
    }
}
