//! Float grid back to packed RGBA8.

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;

/// Quantize the interior of `image` into a fresh `width * height * 4` buffer.
///
/// Channels are clamped and rounded; alpha is always 255.
pub fn encode<E: StageExecutor>(image: &Grid<Rgb>, exec: &E) -> Result<Vec<u8>, PipelineError> {
    let (w, h) = (image.width(), image.height());
    let len = w
        .checked_mul(h)
        .and_then(|cells| cells.checked_mul(4))
        .ok_or(PipelineError::Overflow { width: w, height: h })?;

    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| PipelineError::Allocation { cells: w * h })?;
    out.resize(len, 0u8);

    exec.for_each_row(&mut out, w * 4, |i, row| {
        for (j, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&image.at(i + 1, j + 1).to_rgba8());
        }
    });
    Ok(out)
}
