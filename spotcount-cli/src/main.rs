//! spotcount: count ring-shaped spots in greyscale images.
//!
//! Each stage command runs the pipeline up to that stage and saves the
//! stage image next to the others in the output directory.
#![allow(clippy::uninlined_format_args, clippy::too_many_lines)]

use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use spotcount_algorithms::{
    detect_edges, detect_spots_batch, mask_param, reduce_noise, PipelineOutput, RingMask,
    ScanStatistics, Spot,
};
use spotcount_core::{PipelineConfig, RadiusRange, Stage};
use spotcount_io::{read_raster, save_stage, suffixed_output_path, write_png, write_spot_count};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    SpotcountIo(#[from] spotcount_io::Error),

    #[error("{0}")]
    Core(#[from] spotcount_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ring-template spot counter for greyscale images.
#[derive(Parser)]
#[command(name = "spotcount")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to greyscale
    Greyscale {
        /// Input image
        input: PathBuf,

        /// Directory for stage images
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
    },

    /// Greyscale plus majority-vote noise reduction
    Denoise {
        /// Input image
        input: PathBuf,

        /// Directory for stage images
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
    },

    /// Noise reduction plus edge detection
    Edges {
        /// Input image
        input: PathBuf,

        /// Edge threshold (0-255)
        #[arg(short, long, default_value = "50")]
        epsilon: u8,

        /// Directory for stage images
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
    },

    /// Full pipeline: count spots
    Spots {
        /// Input image(s)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Edge threshold (0-255)
        #[arg(short, long, default_value = "50")]
        epsilon: u8,

        /// Smallest spot radius (4-11)
        #[arg(short, long, default_value = "4")]
        lower: u32,

        /// Largest spot radius (4-11)
        #[arg(short, long, default_value = "4")]
        upper: u32,

        /// Directory for stage images
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Also write `<stem>.out` with the spot count
        #[arg(long)]
        count_file: bool,

        /// Also write the claimed-pixel overlay
        #[arg(long)]
        claims: bool,

        /// Print a JSON report instead of plain counts
        #[arg(long)]
        json: bool,
    },

    /// Print the ring template for a radius
    Mask {
        /// Template radius (4-11)
        radius: u32,
    },
}

#[derive(Serialize)]
struct SpotReport<'a> {
    input: String,
    output: String,
    spot_count: usize,
    epsilon: u8,
    radii: RadiusRange,
    spots: &'a [Spot],
    statistics: &'a ScanStatistics,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn save_spot_outputs(
    input: &Path,
    output: &PipelineOutput,
    output_dir: &Path,
    count_file: bool,
    claims: bool,
) -> Result<PathBuf> {
    let path = save_stage(
        &output.detection.spot_map,
        input,
        output_dir,
        Stage::SpotDetected,
    )?;
    if count_file {
        let count_path = write_spot_count(input, output_dir, output.spot_count())?;
        debug!("wrote {}", count_path.display());
    }
    if claims {
        let claims_path =
            suffixed_output_path(input, output_dir, spotcount_io::CLAIMS_SUFFIX)?;
        write_png(&output.detection.claims.render(), &claims_path)?;
    }
    Ok(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Greyscale { input, output_dir } => {
            let image = read_raster(&input)?;
            let path = save_stage(&image, &input, &output_dir, Stage::Greyscale)?;
            info!("saved {}", path.display());
        }

        Commands::Denoise { input, output_dir } => {
            let image = read_raster(&input)?;
            let reduced = reduce_noise(&image);
            let path = save_stage(&reduced, &input, &output_dir, Stage::NoiseReduced)?;
            info!("saved {}", path.display());
        }

        Commands::Edges {
            input,
            epsilon,
            output_dir,
        } => {
            let image = read_raster(&input)?;
            let edges = detect_edges(&image, epsilon);
            let path = save_stage(&edges, &input, &output_dir, Stage::EdgeDetected)?;
            info!("saved {}", path.display());
        }

        Commands::Spots {
            input,
            epsilon,
            lower,
            upper,
            output_dir,
            count_file,
            claims,
            json,
        } => {
            let config = PipelineConfig::new()
                .with_epsilon(epsilon)
                .with_bounds(lower, upper)?;

            let start = Instant::now();
            let images = input
                .iter()
                .map(read_raster)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let outputs = detect_spots_batch(&images, &config)?;
            debug!(
                "processed {} image(s) in {:.2}s",
                images.len(),
                start.elapsed().as_secs_f64()
            );

            let mut reports = Vec::with_capacity(outputs.len());
            for (path, output) in input.iter().zip(outputs) {
                let output = output?;
                let saved = save_spot_outputs(path, &output, &output_dir, count_file, claims)?;
                if json {
                    reports.push((path.clone(), saved, output));
                } else if input.len() == 1 {
                    println!("{}", output.spot_count());
                } else {
                    println!("{}\t{}", path.display(), output.spot_count());
                }
            }

            if json {
                let summary: Vec<_> = reports
                    .iter()
                    .map(|(path, saved, output)| SpotReport {
                        input: path.display().to_string(),
                        output: saved.display().to_string(),
                        spot_count: output.spot_count(),
                        epsilon: config.epsilon,
                        radii: config.radii,
                        spots: &output.detection.spots,
                        statistics: &output.detection.statistics,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }

        Commands::Mask { radius } => {
            let param = mask_param(radius)?;
            let mask = RingMask::new(radius)?;
            println!(
                "radius {} (ring width {}, delta {}, SAD threshold {})",
                radius, param.ring_width, param.delta, param.sad_threshold
            );
            print!("{}", mask.to_ascii());
        }
    }

    Ok(())
}
