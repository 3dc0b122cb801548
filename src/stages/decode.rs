//! RGBA byte input to float RGB.

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;

/// Decode packed RGBA bytes (`width * height * 4`, row-major, no padding)
/// into a halo-padded float grid. Alpha is dropped.
pub fn decode<E: StageExecutor>(
    width: usize,
    height: usize,
    rgba: &[u8],
    exec: &E,
) -> Result<Grid<Rgb>, PipelineError> {
    debug_assert_eq!(rgba.len(), width * height * 4);
    let mut grid = Grid::try_new(width, height)?;
    let row_bytes = width * 4;

    grid.fill_interior(exec, |row, cells| {
        let src = &rgba[(row - 1) * row_bytes..row * row_bytes];
        for (cell, px) in cells.iter_mut().zip(src.chunks_exact(4)) {
            *cell = Rgb::from_rgba8([px[0], px[1], px[2], px[3]]);
        }
    });
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Sequential;

    #[test]
    fn test_decode_normalizes_and_drops_alpha() {
        let rgba = [255, 0, 51, 0, 0, 255, 102, 255];
        let grid = decode(2, 1, &rgba, &Sequential).unwrap();

        let a = grid.at(1, 1);
        assert_eq!(a, Rgb::new(1.0, 0.0, 51.0 / 255.0));
        let b = grid.at(1, 2);
        assert_eq!(b, Rgb::new(0.0, 1.0, 102.0 / 255.0));
    }

    #[test]
    fn test_decode_extends_border() {
        let rgba = [10, 20, 30, 255, 40, 50, 60, 255, 70, 80, 90, 255, 100, 110, 120, 255];
        let grid = decode(2, 2, &rgba, &Sequential).unwrap();

        assert_eq!(grid.at(0, 0), grid.at(1, 1));
        assert_eq!(grid.at(0, 3), grid.at(1, 2));
        assert_eq!(grid.at(3, 0), grid.at(2, 1));
        assert_eq!(grid.at(3, 3), grid.at(2, 2));
        assert_eq!(grid.at(2, 0), grid.at(2, 1));
    }
}
