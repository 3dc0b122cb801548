//! Brightness map.

use crate::color::Rgb;
use crate::error::PipelineError;
use crate::executor::StageExecutor;
use crate::grid::Grid;

/// Per-cell luminance `(2R + 3G + B) / 6`.
///
/// Computed for every cell including the halo. The stage reads no
/// neighbors, so a source with a fresh border yields a map with a fresh
/// border and no extension pass is needed.
pub fn luminance<E: StageExecutor>(src: &Grid<Rgb>, exec: &E) -> Result<Grid<f32>, PipelineError> {
    let mut lum = Grid::try_new(src.width(), src.height())?;
    let stride = src.stride();
    let colors = src.as_slice();

    lum.fill_all(exec, |row, cells| {
        let src_row = &colors[row * stride..(row + 1) * stride];
        for (cell, px) in cells.iter_mut().zip(src_row) {
            *cell = px.luminance();
        }
    });
    Ok(lum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Sequential;

    #[test]
    fn test_luminance_covers_halo() {
        let colors = [Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0), Rgb::new(0.0, 0.0, 1.0), Rgb::new(1.0, 1.0, 1.0)];
        let src = Grid::from_interior(2, 2, &colors).unwrap();
        let lum = luminance(&src, &Sequential).unwrap();

        assert!((lum.at(1, 1) - 2.0 / 6.0).abs() < 1e-6);
        assert!((lum.at(1, 2) - 0.5).abs() < 1e-6);
        assert!((lum.at(2, 1) - 1.0 / 6.0).abs() < 1e-6);
        assert_eq!(lum.at(2, 2), 1.0);

        // halo matches the replicated source
        assert_eq!(lum.at(0, 0), lum.at(1, 1));
        assert_eq!(lum.at(3, 3), lum.at(2, 2));
        assert_eq!(lum.at(0, 2), lum.at(1, 2));
    }

    #[test]
    fn test_luminance_halo_is_already_extended() {
        let colors: Vec<Rgb> = (0..20).map(|v| Rgb::new(v as f32 / 20.0, 0.3, 0.7)).collect();
        let src = Grid::from_interior(5, 4, &colors).unwrap();
        let lum = luminance(&src, &Sequential).unwrap();
        let mut extended = lum.clone();
        extended.extend_border();
        assert_eq!(lum, extended);
    }
}
