//! Toroidal food grid the ant walks on.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// The Santa Fe trail: 89 food cells on a 32x32 grid, start at the top left.
pub const SANTA_FE_TRAIL: &str = "\
S###............................
...#............................
...#.....................###....
...#....................#....#..
...#....................#....#..
...####.#####........##.........
............#................#..
............#.......#...........
............#.......#........#..
............#.......#...........
....................#...........
............#................#..
............#...................
............#.......#.....###...
............#.......#..#........
.................#..............
................................
............#...........#.......
............#...#..........#....
............#...#...............
............#...#...............
............#...#.........#.....
............#..........#........
............#...................
...##..#####....#...............
.#..............#...............
.#..............#...............
.#......#######.................
.#.....#........................
.......#........................
..####..........................
................................
";

/// Errors raised while reading a trail.
#[derive(Debug, Error)]
pub enum TrailError {
    /// The input has no rows.
    #[error("trail is empty")]
    Empty,
    /// A row differs in width from the first row.
    #[error("trail row {row} has {got} cell(s), expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        got: usize,
    },
    /// The trail file could not be read.
    #[error("failed to read trail {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Nothing here.
    Empty,
    /// Uneaten food.
    Food,
    /// Visited by the ant.
    Passed,
}

/// Rectangular grid of cells with a start position.
///
/// Text format: one line per row, `#` for food, `S` for the start (an empty
/// cell), anything else empty. Trailing blank lines are ignored; without an
/// `S` the ant starts at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: (usize, usize),
}

impl Trail {
    /// Parse a trail from text.
    ///
    /// # Errors
    ///
    /// [`TrailError::Empty`] without rows, [`TrailError::Ragged`] if rows
    /// differ in width.
    pub fn parse(input: &str) -> Result<Self, TrailError> {
        let lines: Vec<&str> = input.trim_end_matches(['\n', '\r']).lines().collect();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if cols == 0 {
            return Err(TrailError::Empty);
        }

        let mut cells = Vec::with_capacity(lines.len() * cols);
        let mut start = (0, 0);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(TrailError::Ragged {
                    row,
                    expected: cols,
                    got: width,
                });
            }
            for (col, c) in line.chars().enumerate() {
                cells.push(match c {
                    '#' => Cell::Food,
                    'S' => {
                        start = (row, col);
                        Cell::Empty
                    }
                    _ => Cell::Empty,
                });
            }
        }

        Ok(Self {
            rows: lines.len(),
            cols,
            cells,
            start,
        })
    }

    /// Read and parse a trail file.
    ///
    /// # Errors
    ///
    /// [`TrailError::Io`] if the file cannot be read, otherwise as
    /// [`Trail::parse`].
    pub fn load(path: &Path) -> Result<Self, TrailError> {
        let input = std::fs::read_to_string(path).map_err(|source| TrailError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&input)
    }

    /// The embedded [`SANTA_FE_TRAIL`].
    ///
    /// # Errors
    ///
    /// Never in practice; the embedded text is well formed.
    pub fn santa_fe() -> Result<Self, TrailError> {
        Self::parse(SANTA_FE_TRAIL)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Start position as `(row, col)`.
    #[must_use]
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// Cell at `(row, col)`; `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Overwrite the cell at `(row, col)`; ignored outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = cell;
        }
    }

    /// Number of uneaten food cells.
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Food).count()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Food => '#',
                    Cell::Passed => 'X',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
