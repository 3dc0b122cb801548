//! Line thinning.
//!
//! Every firing directional test proposes pulling the pixel toward its three
//! light taps. All proposals are scored by the luminance they would produce
//! and the brightest one wins, so overlapping patterns never depend on the
//! order they are checked in.

use crate::color::{blend_channel, Rgb};
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;
use crate::stages::patterns;

/// Thin lines in `image` using its luminance map `lum`, then extend the border.
pub fn thin_lines<E: StageExecutor>(
    image: &Grid<Rgb>,
    lum: &Grid<f32>,
    strength: f32,
    exec: &E,
) -> Result<Grid<Rgb>, PipelineError> {
    let mut dst = Grid::try_new(image.width(), image.height())?;
    dst.fill_interior(exec, |row, cells| {
        for (j, cell) in cells.iter_mut().enumerate() {
            *cell = thin_pixel(image, lum, row, j + 1, strength);
        }
    });
    Ok(dst)
}

fn thin_pixel(image: &Grid<Rgb>, lum: &Grid<f32>, row: usize, col: usize, strength: f32) -> Rgb {
    let lw = lum.window(row, col);
    let cw = image.window(row, col);

    let mut best = cw.cc;
    let mut best_lum = lw.cc;

    for [a, b, c] in patterns::fired(lw) {
        let new_lum = blend_channel(lw.cc, lw.tap(a), lw.tap(b), lw.tap(c), strength);
        if new_lum > best_lum {
            best = cw.cc.blend(cw.tap(a), cw.tap(b), cw.tap(c), strength);
            best_lum = new_lum;
        }
    }
    best
}
