//! Gradient-driven push.
//!
//! The directional tests run on the edge-weight map instead of luminance.
//! The first firing test decides the blend; pixels where nothing fires keep
//! their color.

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;
use crate::stages::patterns;

/// Push `image` toward neighbors chosen from `gradients`.
///
/// This is the last float stage, so the halo of the result is left unset.
pub fn refine<E: StageExecutor>(
    image: &Grid<Rgb>,
    gradients: &Grid<f32>,
    strength: f32,
    exec: &E,
) -> Result<Grid<Rgb>, PipelineError> {
    let mut dst = Grid::try_new(image.width(), image.height())?;
    dst.fill_interior_no_extend(exec, |row, cells| {
        for (j, cell) in cells.iter_mut().enumerate() {
            *cell = push_pixel(image, gradients, row, j + 1, strength);
        }
    });
    Ok(dst)
}

fn push_pixel(image: &Grid<Rgb>, gradients: &Grid<f32>, row: usize, col: usize, strength: f32) -> Rgb {
    let cw = image.window(row, col);
    match patterns::fired(gradients.window(row, col)).next() {
        Some([a, b, c]) => cw.cc.blend(cw.tap(a), cw.tap(b), cw.tap(c), strength),
        None => cw.cc,
    }
}
