//! Anime4K - Library for upscaling anime-style artwork
//!
//! This library provides functionality to:
//! - Enlarge RGBA images with bilinear interpolation
//! - Thin dark line art and push edge pixels toward their bright neighbors
//! - Run every stage sequentially or spread rows over a rayon pool with
//!   byte-identical results
//!
//! ```ignore
//! use anime4k::{Anime4k, ExecutionStrategy};
//!
//! let mut upscaler = Anime4k::new(640, 360, rgba, 1280, 720)?
//!     .with_strategy(ExecutionStrategy::Parallel);
//! upscaler.run()?;
//! let bytes = upscaler.result().unwrap();
//! ```

pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod executor;
pub mod grid;
pub mod pipeline;
pub mod progress;
pub mod stages;

pub use error::PipelineError;
pub use executor::{ExecutionStrategy, RowParallel, Sequential, StageExecutor};
pub use pipeline::{upscale_rgba, Anime4k, Strength};
