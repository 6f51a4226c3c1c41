//! # Positional Stippling
//!
//! This module turns a grid of darkness levels into a binary (black/white)
//! image using a fixed table of hand-tuned stipple patterns, one per level.
//!
//! ## How It Differs from Threshold Dithering
//!
//! A classic ordered dither compares each pixel against a threshold matrix.
//! Here the gray value is first reduced to one of seven darkness levels and
//! each level owns a small repeating tile. The output at `(row, col)`
//! depends only on the level at that cell and on `row % 3`, `row % 2` and
//! `col % 4`, never on neighboring cells, so there is no error diffusion and
//! rows can be processed in any order.
//!
//! ## The Pattern Table
//!
//! `#` is black, `.` is white. Each tile is shown over one full period.
//!
//! ```text
//! Level 6  White        Level 5  VeryLight   Level 4  Light
//! ....                  #...                 #...
//! ....                  ..#.                 ..#.
//!                       ....
//!   0% black              2/12 black           2/8 black
//!
//! Level 3  Middle       Level 2  Dark        Level 1  VeryDark
//! #.#.                  .###                 .###
//! .#.#                  ##.#                 ##.#
//!                                            ####
//!   1/2 black             6/8 black            10/12 black
//!
//! Level 0  Black
//! ####
//! ####
//!   100% black
//! ```
//!
//! Levels 1 and 2 are exact inverses of levels 5 and 4, so the table is
//! symmetric around the checkerboard at level 3 and black coverage grows
//! monotonically from level 6 to level 0.
//!
//! ## Usage Example
//!
//! ```
//! use stippler::grid::Grid;
//! use stippler::pixel::Binary;
//! use stippler::render::stipple::{self, Darkness};
//!
//! // A single cell lookup
//! assert_eq!(Darkness::Middle.pixel(0, 0), Binary::Black);
//! assert_eq!(Darkness::Middle.pixel(0, 1), Binary::White);
//!
//! // A whole grid
//! let levels = Grid::filled(4, 2, 3u8).unwrap();
//! let binary = stipple::stipple(&levels).unwrap();
//! assert_eq!(binary.get(1, 1), Some(&Binary::Black));
//! ```

use tracing::debug;

use crate::error::{Result, StipplerError};
use crate::grid::Grid;
use crate::pixel::Binary;

/// Number of levels the pattern table covers.
pub const LEVEL_COUNT: usize = 7;

/// One of the seven darkness levels, darkest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Darkness {
    Black,
    VeryDark,
    Dark,
    Middle,
    Light,
    VeryLight,
    White,
}

impl Darkness {
    /// All levels in level order (0 first).
    pub const ALL: [Darkness; LEVEL_COUNT] = [
        Darkness::Black,
        Darkness::VeryDark,
        Darkness::Dark,
        Darkness::Middle,
        Darkness::Light,
        Darkness::VeryLight,
        Darkness::White,
    ];

    /// Look up a level by number.
    ///
    /// Anything outside `0..=6` is an [`StipplerError::InvalidLevel`]; the
    /// reported position is `(0, 0)`, use [`stipple`] to get the real cell.
    pub fn from_level(level: i32) -> Result<Self> {
        usize::try_from(level)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(StipplerError::InvalidLevel {
                level,
                row: 0,
                col: 0,
            })
    }

    /// Numeric level, 0 = darkest.
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Darkness::Black => "black",
            Darkness::VeryDark => "very-dark",
            Darkness::Dark => "dark",
            Darkness::Middle => "middle",
            Darkness::Light => "light",
            Darkness::VeryLight => "very-light",
            Darkness::White => "white",
        }
    }

    /// Output pixel for this level at `(row, col)`.
    #[inline]
    pub fn pixel(self, row: usize, col: usize) -> Binary {
        match self {
            Darkness::White => Binary::White,
            Darkness::VeryLight => sparse_dots(row, col),
            Darkness::Light => brick_dots(row, col),
            Darkness::Middle => checkerboard(row, col),
            Darkness::Dark => brick_dots(row, col).invert(),
            Darkness::VeryDark => sparse_dots(row, col).invert(),
            Darkness::Black => Binary::Black,
        }
    }

    /// `(rows, cols)` of one repeating tile.
    pub fn period(self) -> (usize, usize) {
        match self {
            Darkness::White | Darkness::Black => (1, 1),
            Darkness::VeryLight | Darkness::VeryDark => (3, 4),
            Darkness::Light | Darkness::Dark => (2, 4),
            Darkness::Middle => (2, 2),
        }
    }

    /// Fraction of black pixels over one full tile.
    pub fn coverage(self) -> f64 {
        let (rows, cols) = self.period();
        let black = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.pixel(row, col).is_black())
            .count();
        black as f64 / (rows * cols) as f64
    }
}

impl TryFrom<u8> for Darkness {
    type Error = StipplerError;

    fn try_from(level: u8) -> Result<Self> {
        Self::from_level(i32::from(level))
    }
}

/// Two dots per 3x4 tile, third row empty.
///
/// ```text
/// #...
/// ..#.
/// ....
/// ```
#[inline]
fn sparse_dots(row: usize, col: usize) -> Binary {
    match row % 3 {
        0 => dot_at(col, 0),
        1 => dot_at(col, 2),
        _ => Binary::White,
    }
}

/// One dot per 4 columns, offset by 2 on odd rows.
///
/// ```text
/// #...
/// ..#.
/// ```
#[inline]
fn brick_dots(row: usize, col: usize) -> Binary {
    if row % 2 == 0 {
        dot_at(col, 0)
    } else {
        dot_at(col, 2)
    }
}

#[inline]
fn checkerboard(row: usize, col: usize) -> Binary {
    if row % 2 == col % 2 {
        Binary::Black
    } else {
        Binary::White
    }
}

#[inline]
fn dot_at(col: usize, phase: usize) -> Binary {
    if col % 4 == phase {
        Binary::Black
    } else {
        Binary::White
    }
}

fn stipple_cell(row: usize, col: usize, level: u8) -> Result<Binary> {
    Darkness::from_level(i32::from(level))
        .map(|darkness| darkness.pixel(row, col))
        .map_err(|_| StipplerError::InvalidLevel {
            level: i32::from(level),
            row,
            col,
        })
}

/// Expand a level grid into a binary grid of the same dimensions.
///
/// ## Errors
///
/// [`StipplerError::InvalidLevel`] for the first cell (row-major) whose
/// level is not in `0..=6`. Levels are never clamped.
pub fn stipple(levels: &Grid<u8>) -> Result<Grid<Binary>> {
    debug!(
        width = levels.width(),
        height = levels.height(),
        "applying stipple patterns"
    );
    levels.try_map_indexed(|row, col, &level| stipple_cell(row, col, level))
}

/// Same as [`stipple`], with rows spread across the rayon thread pool.
///
/// Output and error reporting are identical to the serial version.
pub fn stipple_parallel(levels: &Grid<u8>) -> Result<Grid<Binary>> {
    debug!(
        width = levels.width(),
        height = levels.height(),
        threads = rayon::current_num_threads(),
        "applying stipple patterns in parallel"
    );
    levels.par_try_map_indexed(|row, col, &level| stipple_cell(row, col, level))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Render one level over a `rows` x `cols` area as `#`/`.` strings.
    fn render(darkness: Darkness, rows: usize, cols: usize) -> Vec<String> {
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| match darkness.pixel(row, col) {
                        Binary::Black => '#',
                        Binary::White => '.',
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_level_numbers_round_trip() {
        for (i, darkness) in Darkness::ALL.iter().enumerate() {
            assert_eq!(darkness.level() as usize, i);
            assert_eq!(Darkness::from_level(i as i32).unwrap(), *darkness);
        }
    }

    #[test]
    fn test_out_of_range_levels() {
        for level in [-1, 7, 8, 255, i32::MIN, i32::MAX] {
            assert!(
                matches!(
                    Darkness::from_level(level),
                    Err(StipplerError::InvalidLevel { level: l, .. }) if l == level
                ),
                "level {} should be rejected",
                level
            );
        }
        assert!(Darkness::try_from(7u8).is_err());
    }

    #[test]
    fn test_white_pattern() {
        assert_eq!(render(Darkness::White, 2, 8), vec!["........", "........"]);
    }

    #[test]
    fn test_very_light_pattern() {
        assert_eq!(
            render(Darkness::VeryLight, 6, 8),
            vec![
                "#...#...", "..#...#.", "........", "#...#...", "..#...#.", "........",
            ]
        );
    }

    #[test]
    fn test_light_pattern() {
        assert_eq!(
            render(Darkness::Light, 4, 8),
            vec!["#...#...", "..#...#.", "#...#...", "..#...#."]
        );
    }

    #[test]
    fn test_middle_pattern() {
        assert_eq!(
            render(Darkness::Middle, 3, 6),
            vec!["#.#.#.", ".#.#.#", "#.#.#."]
        );
    }

    #[test]
    fn test_dark_pattern() {
        assert_eq!(
            render(Darkness::Dark, 4, 8),
            vec![".###.###", "##.###.#", ".###.###", "##.###.#"]
        );
    }

    #[test]
    fn test_very_dark_pattern() {
        assert_eq!(
            render(Darkness::VeryDark, 6, 8),
            vec![
                ".###.###", "##.###.#", "########", ".###.###", "##.###.#", "########",
            ]
        );
    }

    #[test]
    fn test_black_pattern() {
        assert_eq!(render(Darkness::Black, 2, 8), vec!["########", "########"]);
    }

    #[test]
    fn test_inverse_pairs() {
        for row in 0..12 {
            for col in 0..12 {
                assert_eq!(
                    Darkness::Dark.pixel(row, col),
                    Darkness::Light.pixel(row, col).invert()
                );
                assert_eq!(
                    Darkness::VeryDark.pixel(row, col),
                    Darkness::VeryLight.pixel(row, col).invert()
                );
            }
        }
    }

    #[test]
    fn test_coverage_values() {
        let expected = [1.0, 10.0 / 12.0, 6.0 / 8.0, 0.5, 2.0 / 8.0, 2.0 / 12.0, 0.0];
        for (darkness, want) in Darkness::ALL.iter().zip(expected) {
            assert!(
                (darkness.coverage() - want).abs() < 1e-12,
                "{:?} coverage {} != {}",
                darkness,
                darkness.coverage(),
                want
            );
        }
    }

    #[test]
    fn test_coverage_monotonic() {
        for pair in Darkness::ALL.windows(2) {
            assert!(pair[0].coverage() > pair[1].coverage());
        }
    }

    #[test]
    fn test_middle_half_black_in_aligned_blocks() {
        for top in (0..20).step_by(2) {
            for left in (0..20).step_by(2) {
                let black = [(0, 0), (0, 1), (1, 0), (1, 1)]
                    .iter()
                    .filter(|&&(r, c)| Darkness::Middle.pixel(top + r, left + c).is_black())
                    .count();
                assert_eq!(black, 2);
            }
        }
    }

    #[test]
    fn test_all_middle_grid_is_checkerboard() {
        let levels = Grid::filled(13, 9, 3u8).unwrap();
        let binary = stipple(&levels).unwrap();
        assert_eq!(binary.dimensions(), (13, 9));
        for row in 0..9 {
            for col in 0..13 {
                let want = if row % 2 == col % 2 {
                    Binary::Black
                } else {
                    Binary::White
                };
                assert_eq!(binary.get(row, col), Some(&want));
            }
        }
    }

    #[test]
    fn test_solid_levels_over_grid() {
        let white = stipple(&Grid::filled(10, 10, 6u8).unwrap()).unwrap();
        assert!(white.cells().iter().all(|&p| p == Binary::White));

        let black = stipple(&Grid::filled(10, 10, 0u8).unwrap()).unwrap();
        assert!(black.cells().iter().all(|&p| p == Binary::Black));
    }

    #[test]
    fn test_pattern_uses_absolute_position() {
        // Mixed levels keep each level's phase aligned to the image origin
        let levels = Grid::from_rows(vec![vec![5, 5, 4, 4, 3], vec![5, 5, 4, 4, 3]]).unwrap();
        let binary = stipple(&levels).unwrap();
        for row in 0..2 {
            for col in 0..5 {
                let level = *levels.get(row, col).unwrap();
                let want = Darkness::try_from(level).unwrap().pixel(row, col);
                assert_eq!(binary.get(row, col), Some(&want));
            }
        }
    }

    #[test]
    fn test_invalid_level_reports_position() {
        let levels = Grid::from_rows(vec![vec![0, 1, 2], vec![3, 7, 4]]).unwrap();
        match stipple(&levels) {
            Err(StipplerError::InvalidLevel { level, row, col }) => {
                assert_eq!((level, row, col), (7, 1, 1));
            }
            other => panic!("Expected InvalidLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let cells: Vec<u8> = (0..(57 * 31)).map(|i| (i * 7 % 13 % 7) as u8).collect();
        let levels = Grid::from_vec(57, 31, cells).unwrap();
        assert_eq!(
            stipple(&levels).unwrap(),
            stipple_parallel(&levels).unwrap()
        );
    }

    #[test]
    fn test_parallel_invalid_level() {
        let mut rows = vec![vec![3u8; 16]; 32];
        rows[20][4] = 9;
        let levels = Grid::from_rows(rows).unwrap();
        assert!(matches!(
            stipple_parallel(&levels),
            Err(StipplerError::InvalidLevel {
                level: 9,
                row: 20,
                col: 4
            })
        ));
    }
}
