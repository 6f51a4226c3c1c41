//! # Pixel Grid
//!
//! A rectangular, row-major 2-D array shared by every pipeline stage.
//!
//! Rectangularity is checked once, when the grid is built. After that every
//! row is known to have `width` cells, so stages iterate without re-checking.
//!
//! ```
//! use stippler::grid::Grid;
//!
//! let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! assert_eq!(grid.dimensions(), (3, 2));
//! assert_eq!(grid.get(1, 2), Some(&6));
//!
//! // Ragged input is rejected
//! assert!(Grid::from_rows(vec![vec![1, 2], vec![3]]).is_err());
//! ```

use rayon::prelude::*;

use crate::error::{Result, StipplerError};

/// A rectangular grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from a list of rows.
    ///
    /// The first row sets the width. Any row with a different length fails
    /// with [`StipplerError::DimensionMismatch`].
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(cell_count(width, height)?);

        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(StipplerError::DimensionMismatch {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from row-major cells.
    ///
    /// Fails when `cells.len()` is not `width * height`. The reported row is
    /// the first one that comes up short (or `height` when there are extra
    /// cells). Dimensions whose product overflows `usize` fail the same way.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        if cells.len() != cell_count(width, height)? {
            let row = if width == 0 {
                0
            } else {
                (cells.len() / width).min(height)
            };
            let found = if width == 0 {
                cells.len()
            } else {
                cells.len() - (cells.len() / width) * width
            };
            return Err(StipplerError::DimensionMismatch {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.height && col < self.width {
            self.cells.get(row * self.width + col)
        } else {
            None
        }
    }

    /// One row as a slice, or `None` when out of bounds.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.height {
            Some(&self.cells[row * self.width..(row + 1) * self.width])
        } else {
            None
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.height).map(move |row| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Apply `f` to every cell, producing a grid of the same dimensions.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: Fn(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Apply a fallible, position-aware `f` to every cell in row-major order.
    ///
    /// Stops at the first error.
    pub fn try_map_indexed<U, E, F>(&self, mut f: F) -> std::result::Result<Grid<U>, E>
    where
        F: FnMut(usize, usize, &T) -> std::result::Result<U, E>,
    {
        let mut cells = Vec::with_capacity(self.cells.len());
        for (row, cols) in self.rows().enumerate() {
            for (col, cell) in cols.iter().enumerate() {
                cells.push(f(row, col, cell)?);
            }
        }

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl<T: Sync> Grid<T> {
    /// Row-parallel version of [`Grid::try_map_indexed`].
    ///
    /// Each worker owns a disjoint range of output rows. The returned error,
    /// if any, is the first one in row-major order, same as the serial path.
    pub fn par_try_map_indexed<U, E, F>(&self, f: F) -> std::result::Result<Grid<U>, E>
    where
        U: Send,
        E: Send,
        F: Fn(usize, usize, &T) -> std::result::Result<U, E> + Sync,
    {
        if self.width == 0 {
            return Ok(Grid {
                width: 0,
                height: self.height,
                cells: Vec::new(),
            });
        }

        let rows: Vec<std::result::Result<Vec<U>, E>> = self
            .cells
            .par_chunks(self.width)
            .enumerate()
            .map(|(row, cols)| {
                cols.iter()
                    .enumerate()
                    .map(|(col, cell)| f(row, col, cell))
                    .collect()
            })
            .collect();

        let mut cells = Vec::with_capacity(self.cells.len());
        for row in rows {
            cells.extend(row?);
        }

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl<T: Clone> Grid<T> {
    /// A `width` x `height` grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        Ok(Self {
            width,
            height,
            cells: vec![value; cell_count(width, height)?],
        })
    }
}

/// `width * height`, or a mismatch when the product does not fit `usize`.
fn cell_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(StipplerError::DimensionMismatch {
            row: height,
            expected: width,
            found: 0,
        })
}
