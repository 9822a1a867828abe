//! spotcount-core: Core types for greyscale spot counting.
//!
//! This crate provides the raster container shared by every pipeline
//! stage, the fixed Von Neumann stencil, radius/pipeline configuration
//! and the error types.
//!

pub mod config;
pub mod coord;
pub mod error;
pub mod raster;

pub use config::{check_radius, PipelineConfig, RadiusRange, Stage, MAX_RADIUS, MIN_RADIUS};
pub use coord::{Coord, Offset, VON_NEUMANN};
pub use error::{Error, Result};
pub use raster::{Raster, BACKGROUND, EDGE, NO_EDGE};
