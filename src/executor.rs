//! Stage executors: how a stage's rows are scheduled.
//!
//! Every stage writes one output row from read-only inputs, so rows can be
//! computed in any order and on any thread. An executor only decides the
//! schedule; the kernel closure carries all numeric work, which keeps every
//! strategy byte-for-byte equivalent. Returning from
//! [`StageExecutor::for_each_row`] is the barrier between stages.

use crate::error::PipelineError;
use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Maps a per-row kernel over a row-major buffer.
pub trait StageExecutor: Sync {
    /// Call `kernel(row_index, row)` once for every `row_len`-sized row of `buf`.
    ///
    /// All calls have completed when this returns.
    fn for_each_row<T, F>(&self, buf: &mut [T], row_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send;

    /// Number of worker threads rows are spread over.
    fn threads(&self) -> usize;
}

/// Runs every row on the calling thread, top to bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl StageExecutor for Sequential {
    fn for_each_row<T, F>(&self, buf: &mut [T], row_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        for (i, row) in buf.chunks_mut(row_len).enumerate() {
            kernel(i, row);
        }
    }

    fn threads(&self) -> usize {
        1
    }
}

/// Spreads rows over a rayon thread pool.
///
/// Uses the global pool unless built with [`RowParallel::with_threads`].
#[derive(Debug, Default)]
pub struct RowParallel {
    pool: Option<rayon::ThreadPool>,
}

impl RowParallel {
    /// Use rayon's global pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Use a dedicated pool with exactly `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self, PipelineError> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads.max(1)).build()?;
        Ok(Self { pool: Some(pool) })
    }
}

impl StageExecutor for RowParallel {
    fn for_each_row<T, F>(&self, buf: &mut [T], row_len: usize, kernel: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| par_rows(buf, row_len, &kernel)),
            None => par_rows(buf, row_len, &kernel),
        }
    }

    fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

fn par_rows<T, F>(buf: &mut [T], row_len: usize, kernel: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    buf.par_chunks_mut(row_len).enumerate().for_each(|(i, row)| kernel(i, row));
}

/// Execution strategy selection.
///
/// Only wall-clock behavior depends on this; output bytes never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStrategy {
    /// Single-threaded, row by row
    Sequential,
    /// Rows distributed over worker threads (default)
    #[default]
    Parallel,
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "sequential"),
            ExecutionStrategy::Parallel => write!(f, "parallel"),
        }
    }
}
