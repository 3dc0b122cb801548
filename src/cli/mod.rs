//! Command-line interface implementation
//!
//! Parses arguments and hands off to [`upscale::run_upscale`].

mod upscale;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::executor::ExecutionStrategy;

pub use upscale::run_upscale;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Anime4K - upscale anime-style artwork with line thinning and edge refinement
#[derive(Parser, Debug)]
#[command(name = "anime4k")]
#[command(about = "Anime4K - upscale anime-style artwork with line thinning and edge refinement")]
#[command(version)]
pub struct Cli {
    /// Input image (PNG, JPEG, or any format the image crate reads)
    pub input: PathBuf,

    /// Output file or directory.
    /// If omitted: {input}_anime4k.png next to the input
    /// If directory (ends with /): dir/{input}_anime4k.png
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scale factor applied to both axes (default: 2.0)
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// Target width in pixels; height keeps the aspect ratio unless given
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Target height in pixels; width keeps the aspect ratio unless given
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// How stage rows are scheduled (output is identical either way)
    #[arg(long, value_enum)]
    pub strategy: Option<ExecutionStrategy>,

    /// Worker threads for the parallel strategy
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Run the pipeline this many times (for benchmarking)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub passes: Option<u32>,

    /// Print per-stage timings after the last pass
    #[arg(long)]
    pub timings: bool,

    /// Print each stage as it finishes
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to anime4k.toml (default: search upward from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    run_upscale(&cli)
}
