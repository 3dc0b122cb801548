//! Upscaling pipeline orchestration.
//!
//! [`Anime4k`] owns one source image and the requested target size, and runs
//! the stages in order:
//!
//! ```text
//! decode -> linear -> luminance -> thin_lines -> luminance -> gradient -> refine -> encode
//! ```
//!
//! Every intermediate buffer lives only for the duration of [`Anime4k::run`].

use crate::error::PipelineError;
use crate::executor::{ExecutionStrategy, RowParallel, Sequential, StageExecutor};
use crate::progress::{NullProgress, ProgressReporter, Stage, StageEvent};
use crate::stages::{decode, encode, gradient, luminance, refine, thin_lines, upscale};
use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;

/// Blend strengths derived from the horizontal scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strength {
    /// Weight of the line thinning pull, `min(scale / 6, 1)`
    pub thin: f32,
    /// Weight of the gradient push, `min(scale / 2, 1)`
    pub refine: f32,
}

impl Strength {
    /// Strengths for enlarging `source_width` to `target_width`.
    pub fn from_widths(source_width: u32, target_width: u32) -> Self {
        let scale = target_width as f32 / source_width as f32;
        Self { thin: (scale / 6.0).min(1.0), refine: (scale / 2.0).min(1.0) }
    }
}

/// One upscaling job: a source RGBA buffer and a target size.
pub struct Anime4k {
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
    source: Vec<u8>,
    strength: Strength,
    strategy: ExecutionStrategy,
    parallel: RowParallel,
    reporter: Arc<dyn ProgressReporter>,
    result: Option<Vec<u8>>,
}

impl std::fmt::Debug for Anime4k {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anime4k")
            .field("source", &(self.source_width, self.source_height))
            .field("target", &(self.target_width, self.target_height))
            .field("strength", &self.strength)
            .field("strategy", &self.strategy)
            .field("threads", &self.threads())
            .field("has_result", &self.result.is_some())
            .finish()
    }
}

impl Anime4k {
    /// Create a pipeline for `source` (packed RGBA, `source_width * source_height * 4` bytes).
    ///
    /// No stage buffers are allocated until [`Anime4k::run`].
    pub fn new(
        source_width: u32,
        source_height: u32,
        source: Vec<u8>,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, PipelineError> {
        if source_width == 0 || source_height == 0 || target_width == 0 || target_height == 0 {
            return Err(PipelineError::InvalidDimensions {
                source_width,
                source_height,
                target_width,
                target_height,
            });
        }

        let expected = (source_width as usize)
            .checked_mul(source_height as usize)
            .and_then(|px| px.checked_mul(4))
            .unwrap_or(usize::MAX);
        if source.len() != expected {
            return Err(PipelineError::BufferSize { expected, actual: source.len() });
        }

        Ok(Self {
            source_width,
            source_height,
            target_width,
            target_height,
            source,
            strength: Strength::from_widths(source_width, target_width),
            strategy: ExecutionStrategy::default(),
            parallel: RowParallel::new(),
            reporter: Arc::new(NullProgress::new()),
            result: None,
        })
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use a dedicated pool of `jobs` threads for the parallel strategy.
    ///
    /// The pool is built here once and reused by every [`Anime4k::run`].
    pub fn with_jobs(mut self, jobs: usize) -> Result<Self, PipelineError> {
        self.parallel = RowParallel::with_threads(jobs)?;
        Ok(self)
    }

    /// Attach a progress reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Worker threads [`Anime4k::run`] spreads rows over.
    pub fn threads(&self) -> usize {
        match self.strategy {
            ExecutionStrategy::Sequential => Sequential.threads(),
            ExecutionStrategy::Parallel => self.parallel.threads(),
        }
    }

    /// Run every stage with the configured strategy and store the result.
    ///
    /// Any previous result is discarded first, so a failed run leaves none.
    pub fn run(&mut self) -> Result<(), PipelineError> {
        self.result = None;
        let bytes = match self.strategy {
            ExecutionStrategy::Sequential => self.process(&Sequential)?,
            ExecutionStrategy::Parallel => self.process(&self.parallel)?,
        };
        self.result = Some(bytes);
        Ok(())
    }

    /// Run every stage on a caller-supplied executor.
    pub fn run_with<E: StageExecutor>(&mut self, exec: &E) -> Result<(), PipelineError> {
        self.result = None;
        let bytes = self.process(exec)?;
        self.result = Some(bytes);
        Ok(())
    }

    /// Packed RGBA of the last successful run, `target_width * target_height * 4` bytes.
    pub fn result(&self) -> Option<&[u8]> {
        self.result.as_deref()
    }

    /// Consume the pipeline, returning the last result.
    pub fn into_result(self) -> Option<Vec<u8>> {
        self.result
    }

    fn process<E: StageExecutor>(&self, exec: &E) -> Result<Vec<u8>, PipelineError> {
        let started = Instant::now();
        self.reporter.report(StageEvent::RunStarted {
            source: (self.source_width, self.source_height),
            target: (self.target_width, self.target_height),
            strength: self.strength,
        });

        let (sw, sh) = (self.source_width as usize, self.source_height as usize);
        let (tw, th) = (self.target_width as usize, self.target_height as usize);

        let source = self.stage(Stage::Decode, || decode(sw, sh, &self.source, exec))?;
        let enlarged = self.stage(Stage::Linear, || upscale(&source, tw, th, exec))?;
        drop(source);

        let lum = self.stage(Stage::Luminance, || luminance(&enlarged, exec))?;
        let thinned =
            self.stage(Stage::ThinLines, || thin_lines(&enlarged, &lum, self.strength.thin, exec))?;
        drop(enlarged);

        // thinning changed the colors, so brightness is measured again
        let lum = self.stage(Stage::Luminance, || luminance(&thinned, exec))?;
        let gradients = self.stage(Stage::Gradient, || gradient(&lum, exec))?;
        drop(lum);

        let refined =
            self.stage(Stage::Refine, || refine(&thinned, &gradients, self.strength.refine, exec))?;
        drop(thinned);
        drop(gradients);

        let bytes = self.stage(Stage::Encode, || encode(&refined, exec))?;

        self.reporter.report(StageEvent::RunFinished { duration: started.elapsed() });
        Ok(bytes)
    }

    fn stage<T>(
        &self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, PipelineError>,
    ) -> Result<T, PipelineError> {
        self.reporter.report(StageEvent::StageStarted(stage));
        let started = Instant::now();
        let out = f()?;
        self.reporter.report(StageEvent::StageFinished { stage, duration: started.elapsed() });
        Ok(out)
    }
}

/// Upscale an [`RgbaImage`] to `width x height` in one call.
pub fn upscale_rgba(
    image: &RgbaImage,
    width: u32,
    height: u32,
    strategy: ExecutionStrategy,
) -> Result<RgbaImage, PipelineError> {
    let mut upscaler =
        Anime4k::new(image.width(), image.height(), image.as_raw().clone(), width, height)?
            .with_strategy(strategy);
    upscaler.run()?;

    let bytes = upscaler.into_result().unwrap_or_default();
    let actual = bytes.len();
    RgbaImage::from_raw(width, height, bytes).ok_or(PipelineError::BufferSize {
        expected: width as usize * height as usize * 4,
        actual,
    })
}
