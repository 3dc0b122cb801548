//! Bilinear enlargement.
//!
//! Destination pixel `(i, j)` samples the source at `x = i * old_height / height`
//! (rows) and `y = j * old_width / width` (columns). The four taps start at
//! halo coordinates `(floor(x) + 1, floor(y) + 1)`; the `+ 1` skips the halo.
//! Taps at the last source row or column read the replicated halo, so the
//! source grid must have a fresh border.

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;

/// Resample `src` to `width x height` and extend the border of the result.
pub fn upscale<E: StageExecutor>(
    src: &Grid<Rgb>,
    width: usize,
    height: usize,
    exec: &E,
) -> Result<Grid<Rgb>, PipelineError> {
    let (old_width, old_height) = (src.width(), src.height());
    let mut dst = Grid::try_new(width, height)?;

    dst.fill_interior(exec, |row, cells| {
        let (h, f) = source_coord(row - 1, old_height, height);
        for (j, cell) in cells.iter_mut().enumerate() {
            let (w, g) = source_coord(j, old_width, width);
            *cell = Rgb::interpolate(
                src.at(h, w),
                src.at(h, w + 1),
                src.at(h + 1, w),
                src.at(h + 1, w + 1),
                f,
                g,
            );
        }
    });
    Ok(dst)
}

/// Halo index of the first tap and the fractional weight toward the second.
#[inline]
fn source_coord(dst: usize, old_len: usize, new_len: usize) -> (usize, f32) {
    // f64 keeps the quotient strictly below `old_len` for any realistic size
    let x = (dst as f64 * old_len as f64) / new_len as f64;
    let floor = x.floor();
    (floor as usize + 1, (x - floor) as f32)
}
