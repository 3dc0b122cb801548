//! Edge weights from a luminance map.

use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::{Grid, Window};

/// Inverted Sobel magnitude of `lum`, border extended.
///
/// Flat areas map to 1, strong edges to 0. The magnitude is clamped to
/// `[0, 1]` before inversion, so the output always stays in `[0, 1]`.
pub fn gradient<E: StageExecutor>(lum: &Grid<f32>, exec: &E) -> Result<Grid<f32>, PipelineError> {
    let mut dst = Grid::try_new(lum.width(), lum.height())?;
    dst.fill_interior(exec, |row, cells| {
        for (j, cell) in cells.iter_mut().enumerate() {
            *cell = edge_weight(&lum.window(row, j + 1));
        }
    });
    Ok(dst)
}

/// `1 - clamp(sqrt(xgrad^2 + ygrad^2), 0, 1)` over a 3x3 window.
#[inline]
pub fn edge_weight(w: &Window<f32>) -> f32 {
    // [-1  0  1]
    // [-2  0  2]
    // [-1  0  1]
    let xgrad = w.tr - w.tl + w.r + w.r - w.l - w.l + w.br - w.bl;

    // [-1 -2 -1]
    // [ 0  0  0]
    // [ 1  2  1]
    let ygrad = w.bl - w.tl + w.b + w.b - w.t - w.t + w.br - w.tr;

    1.0 - (xgrad * xgrad + ygrad * ygrad).sqrt().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Sequential;

    #[test]
    fn test_flat_map_is_one() {
        let lum = Grid::from_interior(4, 4, &[0.37; 16]).unwrap();
        let grad = gradient(&lum, &Sequential).unwrap();
        assert!(grad.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_hard_vertical_edge_is_zero() {
        #[rustfmt::skip]
        let values = [
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 1.0, 1.0,
        ];
        let lum = Grid::from_interior(4, 3, &values).unwrap();
        let grad = gradient(&lum, &Sequential).unwrap();
        // columns next to the step see xgrad = 4
        assert_eq!(grad.at(2, 2), 0.0);
        assert_eq!(grad.at(2, 3), 0.0);
        // outer columns see only the replicated halo
        assert_eq!(grad.at(2, 1), 1.0);
        assert_eq!(grad.at(2, 4), 1.0);
    }

    #[test]
    fn test_gentle_slope_partial_weight() {
        // horizontal ramp of 0.05 per column: xgrad = (1 + 2 + 1) * 2 * 0.05
        let values: Vec<f32> = (0..15).map(|i| (i % 5) as f32 * 0.05).collect();
        let lum = Grid::from_interior(5, 3, &values).unwrap();
        let grad = gradient(&lum, &Sequential).unwrap();
        assert!((grad.at(2, 3) - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_output_range_for_extreme_inputs() {
        let values = [
            -1.0e30, 3.0e38, 0.0, 1.0, -3.0e38, 0.5, 1.0e-30, 7.0, -7.0, 123.0, 0.25, -0.25,
        ];
        let lum = Grid::from_interior(4, 3, &values).unwrap();
        let grad = gradient(&lum, &Sequential).unwrap();
        for &v in grad.as_slice() {
            assert!((0.0..=1.0).contains(&v), "{} out of range", v);
        }
    }
}
