//! spotcount-algorithms: Pixel passes for greyscale spot counting.
//!
//! This crate provides the pipeline stages:
//! - **Noise reduction** - majority vote over the Von Neumann stencil
//! - **Edge detection** - threshold on neighbour intensity differences
//! - **Ring masks** - fixed annulus templates for radii 4 to 11
//! - **Spot detection** - multi-radius template matching with claim-based
//!   overlap suppression
//!
#![warn(missing_docs)]

mod edge;
pub mod mask;
mod noise;
mod processing;
mod spot;

pub use edge::EdgeDetector;
pub use mask::{mask_param, MaskParam, RingMask, RingMaskLibrary};
pub use noise::{majority_vote, NoiseReducer};
pub use processing::{
    detect_edges, detect_spots, detect_spots_batch, reduce_noise, PipelineOutput,
};
pub use spot::{ClaimGrid, RadiusPass, ScanStatistics, Spot, SpotDetection, SpotDetector};

// Re-export core configuration
pub use spotcount_core::{PipelineConfig, RadiusRange};
