//! Error types for the upscaling pipeline

use thiserror::Error;

/// Errors raised while constructing or running an [`Anime4k`](crate::pipeline::Anime4k) pipeline.
///
/// Codec failures live in [`CodecError`](crate::codec::CodecError) so callers can
/// tell a malformed input file apart from a bad pipeline configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// A source or target dimension was zero
    #[error(
        "invalid dimensions: source {source_width}x{source_height}, target {target_width}x{target_height} (all must be positive)"
    )]
    InvalidDimensions {
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
    },
    /// The RGBA source buffer does not match `width * height * 4`
    #[error("source buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    /// A stage buffer could not be allocated
    #[error("failed to allocate a stage buffer of {cells} cells")]
    Allocation { cells: usize },
    /// A stage buffer of the requested size cannot be addressed
    #[error("a {width}x{height} stage buffer is too large to address")]
    Overflow { width: usize, height: usize },
    /// The dedicated worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for PipelineError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        PipelineError::ThreadPool(e.to_string())
    }
}
