//! spotcount-io: Image I/O for spotcount.
//!
//! This crate decodes images into greyscale rasters and writes stage
//! images and spot counts using the `image` crate. The pixel pipeline
//! itself never touches the filesystem.
//!

mod error;
pub mod greyscale;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use greyscale::{luma, to_greyscale};
pub use reader::read_raster;
pub use writer::{
    raster_to_image, save_stage, stage_output_path, suffixed_output_path, write_png,
    write_spot_count, CLAIMS_SUFFIX,
};
