//! High-level helpers that chain the pipeline stages.

use crate::{EdgeDetector, NoiseReducer, SpotDetection, SpotDetector};
use log::info;
use rayon::prelude::*;
use spotcount_core::{PipelineConfig, Raster, Result};

/// Every intermediate product of a full pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Majority-vote smoothed raster.
    pub noise_reduced: Raster,
    /// Binary edge raster.
    pub edges: Raster,
    /// Spot detection result.
    pub detection: SpotDetection,
}

impl PipelineOutput {
    /// Number of detected spots.
    #[must_use]
    pub fn spot_count(&self) -> usize {
        self.detection.spot_count
    }
}

/// Runs the noise reduction pass.
#[must_use]
pub fn reduce_noise(image: &Raster) -> Raster {
    NoiseReducer::new().reduce(image)
}

/// Runs noise reduction followed by edge detection.
#[must_use]
pub fn detect_edges(image: &Raster, epsilon: u8) -> Raster {
    EdgeDetector::new(epsilon).detect(&reduce_noise(image))
}

/// Runs the whole pipeline on a greyscale raster.
///
/// # Errors
/// Returns the configuration error before any pixel work if the radius
/// range is invalid.
pub fn detect_spots(image: &Raster, config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    let detector = SpotDetector::new(config.radii);
    run(image, config.epsilon, &detector)
}

/// Runs the whole pipeline on independent images in parallel.
///
/// Each image gets its own buffers and claim grid. Results are returned in
/// input order.
///
/// # Errors
/// Returns the configuration error before any pixel work if the radius
/// range is invalid.
pub fn detect_spots_batch(
    images: &[Raster],
    config: &PipelineConfig,
) -> Result<Vec<Result<PipelineOutput>>> {
    config.validate()?;
    let detector = SpotDetector::new(config.radii);
    Ok(images
        .par_iter()
        .map(|image| run(image, config.epsilon, &detector))
        .collect())
}

fn run(image: &Raster, epsilon: u8, detector: &SpotDetector) -> Result<PipelineOutput> {
    let noise_reduced = reduce_noise(image);
    let edges = EdgeDetector::new(epsilon).detect(&noise_reduced);
    let detection = detector.detect(&edges)?;
    info!(
        "{}x{} image: {} spots (radii {}..={}, epsilon {})",
        image.width(),
        image.height(),
        detection.spot_count,
        detector.radii().lower(),
        detector.radii().upper(),
        epsilon
    );
    Ok(PipelineOutput {
        noise_reduced,
        edges,
        detection,
    })
}
