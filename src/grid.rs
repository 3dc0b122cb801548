//! Halo-padded 2D buffers.
//!
//! A [`Grid`] stores `width x height` interior cells surrounded by a one-cell
//! halo ("ghost pixels") on every side, so a 3x3 stencil centred on any
//! interior cell never leaves the allocation. Row and column arguments are
//! halo coordinates: interior rows are `1..=height`, interior columns
//! `1..=width`.
//!
//! ```text
//!   h h h h h
//!   h i i i h     h = halo, refreshed by `extend_border`
//!   h i i i h     i = interior, written by a stage
//!   h h h h h
//! ```

use crate::error::PipelineError;
use crate::executor::StageExecutor;

/// Row-major buffer with a one-cell halo border.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// The 3x3 neighborhood around a cell.
///
/// ```text
/// [tl  t tr]
/// [ l cc  r]
/// [bl  b br]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<T> {
    pub tl: T,
    pub t: T,
    pub tr: T,
    pub l: T,
    pub cc: T,
    pub r: T,
    pub bl: T,
    pub b: T,
    pub br: T,
}

impl<T: Copy + Default + Send + Sync> Grid<T> {
    /// Allocate a zeroed grid with room for the halo.
    ///
    /// Fails with [`PipelineError::Overflow`] when the size does not fit in
    /// `usize`, and with [`PipelineError::Allocation`] instead of aborting when
    /// the buffer cannot be reserved.
    pub fn try_new(width: usize, height: usize) -> Result<Self, PipelineError> {
        let cells = width
            .checked_add(2)
            .zip(height.checked_add(2))
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(PipelineError::Overflow { width, height })?;

        let mut data = Vec::new();
        data.try_reserve_exact(cells).map_err(|_| PipelineError::Allocation { cells })?;
        data.resize(cells, T::default());

        Ok(Self { width, height, data })
    }

    /// Build a grid from row-major interior values and extend its border.
    pub fn from_interior(width: usize, height: usize, values: &[T]) -> Result<Self, PipelineError> {
        debug_assert_eq!(values.len(), width * height);
        let mut grid = Self::try_new(width, height)?;
        for (row, src) in values.chunks_exact(width.max(1)).enumerate().take(height) {
            let start = (row + 1) * grid.stride() + 1;
            grid.data[start..start + width].copy_from_slice(src);
        }
        grid.extend_border();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance in cells between vertically adjacent cells.
    pub fn stride(&self) -> usize {
        self.width + 2
    }

    /// The whole buffer, halo included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height + 2, "row {} outside grid of height {}", row, self.height);
        debug_assert!(col < self.width + 2, "col {} outside grid of width {}", col, self.width);
        row * self.stride() + col
    }

    /// Cell at halo coordinates `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.data[self.index(row, col)]
    }

    /// Neighborhood of the interior cell at halo coordinates `(row, col)`.
    #[inline]
    pub fn window(&self, row: usize, col: usize) -> Window<T> {
        debug_assert!(row >= 1 && row <= self.height && col >= 1 && col <= self.width);
        let s = self.stride();
        let cc = row * s + col;
        let d = &self.data;
        Window {
            tl: d[cc - s - 1],
            t: d[cc - s],
            tr: d[cc - s + 1],
            l: d[cc - 1],
            cc: d[cc],
            r: d[cc + 1],
            bl: d[cc + s - 1],
            b: d[cc + s],
            br: d[cc + s + 1],
        }
    }

    /// Copy of the interior cells, row-major, without the halo.
    pub fn interior(&self) -> Vec<T> {
        self.interior_rows().flatten().copied().collect()
    }

    /// Interior rows, each `width` cells long.
    pub fn interior_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        let w = self.width;
        self.data.chunks_exact(self.stride()).skip(1).take(self.height).map(move |row| &row[1..=w])
    }

    /// Replicate edge cells outward into the halo.
    ///
    /// Left and right halo columns are copied from the first and last interior
    /// columns, then the full top and bottom halo rows (corners included) are
    /// copied from the first and last rows. Corners therefore take the value
    /// of the adjacent extended edge cell. Applying this twice is the same as
    /// applying it once.
    pub fn extend_border(&mut self) {
        let (w, h, s) = (self.width, self.height, self.stride());
        for row in self.data.chunks_exact_mut(s).skip(1).take(h) {
            row[0] = row[1];
            row[w + 1] = row[w];
        }
        self.data.copy_within(s..2 * s, 0);
        self.data.copy_within(h * s..(h + 1) * s, (h + 1) * s);
    }

    /// Compute every interior cell with `kernel(row, interior_row)`, then extend the border.
    ///
    /// `row` is the halo row index (`1..=height`); `interior_row` holds the
    /// `width` interior cells of that row, so `interior_row[j - 1]` is column `j`.
    pub fn fill_interior<E, F>(&mut self, exec: &E, kernel: F)
    where
        E: StageExecutor,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        self.fill_interior_no_extend(exec, kernel);
        self.extend_border();
    }

    /// Like [`Grid::fill_interior`] but leaves the halo untouched.
    pub fn fill_interior_no_extend<E, F>(&mut self, exec: &E, kernel: F)
    where
        E: StageExecutor,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let (w, h, s) = (self.width, self.height, self.stride());
        exec.for_each_row(&mut self.data[s..(h + 1) * s], s, |i, row| {
            kernel(i + 1, &mut row[1..=w]);
        });
    }

    /// Compute every cell, halo included, with `kernel(row, full_row)`.
    pub fn fill_all<E, F>(&mut self, exec: &E, kernel: F)
    where
        E: StageExecutor,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let s = self.stride();
        exec.for_each_row(&mut self.data, s, kernel);
    }
}
