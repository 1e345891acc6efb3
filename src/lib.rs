// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements an engine for generating, analyzing and solving
//! classic 9x9 Sudoku at scale. It supports the following key features:
//!
//! * Parsing and printing Sudoku grids with a protected layer of givens
//! * Tracking candidate digits for every cell and propagating hidden singles
//! * Solving Sudoku with a minimum-remaining-candidates backtracking search
//! * Certifying that a found solution is the *unique* one
//! * Reducing solved grids into minimal puzzles by recursive digit removal
//!
//! # Parsing and printing grids
//!
//! See [SudokuGrid::parse] for the exact format of a grid code. Codes can be
//! used to exchange Sudoku, while pretty prints can be used to display a grid
//! in a clearer manner. An example of how to parse and display a grid is
//! provided below.
//!
//! ```
//! use sudoku_mill::SudokuGrid;
//!
//! let grid = SudokuGrid::parse("\
//!     000081000002007800053000170370000000600000003\
//!     000000024069000230005900400000650000").unwrap();
//! println!("{}", grid);
//! ```
//!
//! Every digit present at construction time is a *given*: it is stored in a
//! separate initial layer and can never be overwritten through
//! [SudokuGrid::set_cell]. The 81-character code of the current state, called
//! the fingerprint, is the canonical identity of a grid and round-trips
//! through [SudokuGrid::parse].
//!
//! # Solving Sudoku
//!
//! The [BacktrackingSolver](solver::BacktrackingSolver) interleaves
//! hidden-single propagation with a backtracking search that always branches
//! on the cell with the fewest candidates. Its top-level
//! [solve](solver::BacktrackingSolver::solve) additionally verifies that no
//! second solution exists.
//!
//! ```
//! use sudoku_mill::SudokuGrid;
//! use sudoku_mill::solver::BacktrackingSolver;
//!
//! let mut grid = SudokuGrid::parse("\
//!     000081000002007800053000170370000000600000003\
//!     000000024069000230005900400000650000").unwrap();
//! let mut solver = BacktrackingSolver::new();
//! let solution = solver.solve(&mut grid).unwrap();
//!
//! assert!(solution.is_solved());
//! assert!(solver.steps() > 0);
//! ```
//!
//! A puzzle without any solution *and* a puzzle with more than one solution
//! both make `solve` return `None`. Callers who need to distinguish the two
//! cases use [classify](solver::BacktrackingSolver::classify), which returns
//! the full [Solution](solver::Solution) verdict.
//!
//! # Reducing Sudoku
//!
//! The [Reducer](reducer::Reducer) starts from a uniquely solvable grid and
//! searches the space of given-removals for puzzles that are still uniquely
//! solvable after a target number of cells has been cleared. See the
//! [reducer] module for details.

pub mod candidates;
pub mod error;
pub mod reducer;
pub mod solver;
pub mod util;

use error::{GridError, GridParseError, GridParseResult, GridResult};

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// The number of rows, columns and blocks of a grid.
pub const SIZE: usize = 9;

/// The number of cells of a grid.
pub const NUM_CELLS: usize = SIZE * SIZE;

pub(crate) fn index(column: usize, row: usize) -> usize {
    row * SIZE + column
}

/// A Sudoku grid is a square of 9x9 cells, organized into nine 3x3 blocks.
/// Each cell either holds a digit 1 to 9 or is empty, represented by 0.
///
/// Two layers are carried per grid: the *initial* layer holding the givens of
/// the puzzle and the *current* layer holding the playable state. Any cell
/// that is non-zero in the initial layer can never be altered in the current
/// layer; [SudokuGrid::set_cell] silently refuses such writes. This triple
/// guard (valid coordinates, valid value, no given) is the sole protection
/// mechanism for givens - there is no separate lock flag.
///
/// Equality of two grids is defined over the current layer only, since that
/// is what identifies a puzzle state or a solution snapshot. The canonical
/// textual identity is provided by [SudokuGrid::fingerprint].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct SudokuGrid {
    initial: Vec<u8>,
    cells: Vec<u8>
}

impl PartialEq for SudokuGrid {
    fn eq(&self, other: &SudokuGrid) -> bool {
        self.cells == other.cells
    }
}

impl Eq for SudokuGrid { }

fn to_char(cell: u8) -> char {
    if cell == 0 {
        ' '
    }
    else {
        (b'0' + cell) as char
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % 3 == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.cells[index(x, y)]), ' ', '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % 3 == 0 {
                f.write_str(thick_separator_line().as_str())?;
            }
            else {
                f.write_str(thin_separator_line().as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

fn parse_digit(c: char) -> GridParseResult<u8> {
    c.to_digit(10)
        .map(|d| d as u8)
        .ok_or(GridParseError::InvalidCharacter)
}

fn unit_is_permutation(unit: &[u8; SIZE]) -> bool {
    let mut seen = util::DigitSet::new();

    for &value in unit {
        if value == 0 || !seen.insert(value) {
            return false;
        }
    }

    true
}

impl SudokuGrid {

    /// Creates a new, empty Sudoku grid without any givens.
    pub fn empty() -> SudokuGrid {
        SudokuGrid {
            initial: vec![0; NUM_CELLS],
            cells: vec![0; NUM_CELLS]
        }
    }

    /// Creates a grid from a row-major 9x9 matrix of digits, where 0
    /// represents an empty cell. All non-zero digits become givens.
    ///
    /// # Errors
    ///
    /// `GridError::InvalidDigit` if any matrix entry is greater than 9.
    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> GridResult<SudokuGrid> {
        let mut cells = Vec::with_capacity(NUM_CELLS);

        for row in rows.iter() {
            for &value in row.iter() {
                if value > 9 {
                    return Err(GridError::InvalidDigit);
                }

                cells.push(value);
            }
        }

        Ok(SudokuGrid {
            initial: cells.clone(),
            cells
        })
    }

    /// Parses a code encoding a Sudoku grid. Two shapes are accepted: a
    /// contiguous string of exactly 81 digits, or 9 whitespace/newline
    /// separated rows of exactly 9 digits each. In both cases the digits are
    /// assigned left-to-right, top-to-bottom, and 0 represents an empty cell.
    /// All non-zero digits become givens.
    ///
    /// As an example, the two codes below parse to the same grid:
    ///
    /// ```
    /// use sudoku_mill::SudokuGrid;
    ///
    /// let compact = SudokuGrid::parse("\
    ///     530070000600195000098000060800060003400803001\
    ///     700020006060000280000419005000080079").unwrap();
    /// let lines = SudokuGrid::parse("
    ///     530070000
    ///     600195000
    ///     098000060
    ///     800060003
    ///     400803001
    ///     700020006
    ///     060000280
    ///     000419005
    ///     000080079").unwrap();
    /// assert_eq!(compact, lines);
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `GridParseError` (see that documentation).
    pub fn parse(code: &str) -> GridParseResult<SudokuGrid> {
        let code = code.trim();
        let mut cells = Vec::with_capacity(NUM_CELLS);

        if code.split_whitespace().nth(1).is_some() {
            let rows: Vec<&str> = code.split_whitespace().collect();

            if rows.len() != SIZE {
                return Err(GridParseError::WrongNumberOfRows);
            }

            for row in rows {
                if row.chars().count() != SIZE {
                    return Err(GridParseError::WrongRowLength);
                }

                for c in row.chars() {
                    cells.push(parse_digit(c)?);
                }
            }
        }
        else {
            if code.chars().count() != NUM_CELLS {
                return Err(GridParseError::WrongLength);
            }

            for c in code.chars() {
                cells.push(parse_digit(c)?);
            }
        }

        Ok(SudokuGrid {
            initial: cells.clone(),
            cells
        })
    }

    /// Gets the content of the cell at the specified position, or `None` if
    /// either coordinate lies outside the range `[0, 9)`. This accessor never
    /// panics.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell.
    /// * `row`: The row (y-coordinate) of the desired cell.
    pub fn get_cell(&self, column: usize, row: usize) -> Option<u8> {
        if column >= SIZE || row >= SIZE {
            None
        }
        else {
            Some(self.cells[index(column, row)])
        }
    }

    /// Gets the given at the specified position, that is, the digit the
    /// initial layer holds there. `None` if the coordinates are out of range
    /// or the cell holds no given.
    pub fn given(&self, column: usize, row: usize) -> Option<u8> {
        if column >= SIZE || row >= SIZE {
            return None;
        }

        match self.initial[index(column, row)] {
            0 => None,
            value => Some(value)
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// digit, where 0 clears the cell. The write is a silent no-op unless the
    /// coordinates are in range, the value is in `[0, 9]` and the cell holds
    /// no given. This keeps the hot solver loop free of error plumbing while
    /// still protecting the initial layer on every mutation.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell.
    /// * `row`: The row (y-coordinate) of the assigned cell.
    /// * `value`: The digit to assign, 0 to 9.
    pub fn set_cell(&mut self, column: usize, row: usize, value: u8) {
        if column < SIZE && row < SIZE && value <= 9 &&
                self.initial[index(column, row)] == 0 {
            self.cells[index(column, row)] = value;
        }
    }

    /// Clears the content of the cell at the specified position. Like
    /// [SudokuGrid::set_cell], this is a no-op on givens and out-of-range
    /// coordinates.
    pub fn clear_cell(&mut self, column: usize, row: usize) {
        self.set_cell(column, row, 0);
    }

    /// Returns the 9 values of row `i` (in 0..9), left to right.
    pub fn row(&self, i: usize) -> [u8; SIZE] {
        let mut result = [0; SIZE];

        for (column, value) in result.iter_mut().enumerate() {
            *value = self.cells[index(column, i)];
        }

        result
    }

    /// Returns the 9 values of column `i` (in 0..9), top to bottom.
    pub fn column(&self, i: usize) -> [u8; SIZE] {
        let mut result = [0; SIZE];

        for (row, value) in result.iter_mut().enumerate() {
            *value = self.cells[index(i, row)];
        }

        result
    }

    /// Returns the 9 values of block `i` (in 0..9), where blocks tile the
    /// grid row-major: block 0 is the top-left 3x3 square, block 2 the
    /// top-right one and block 8 the bottom-right one. Values are in
    /// left-to-right, top-to-bottom order within the block.
    pub fn block(&self, i: usize) -> [u8; SIZE] {
        let base_column = (i % 3) * 3;
        let base_row = (i / 3) * 3;
        let mut result = [0; SIZE];

        for j in 0..SIZE {
            let column = base_column + j % 3;
            let row = base_row + j / 3;
            result[j] = self.cells[index(column, row)];
        }

        result
    }

    /// Indicates whether this grid is solved, i.e. every row, every column
    /// and every block is a permutation of the digits 1 to 9. All 27 units
    /// are checked.
    pub fn is_solved(&self) -> bool {
        (0..SIZE).all(|i|
            unit_is_permutation(&self.row(i)) &&
            unit_is_permutation(&self.column(i)) &&
            unit_is_permutation(&self.block(i)))
    }

    /// Returns the canonical fingerprint of this grid: the 81 digits of the
    /// current layer concatenated in row-major order. Parsing a fingerprint
    /// with [SudokuGrid::parse] reproduces a grid with equal content.
    pub fn fingerprint(&self) -> String {
        self.cells.iter()
            .map(|&c| (b'0' + c) as char)
            .collect()
    }

    /// Resets the current layer to the initial layer, undoing all plays.
    pub fn reset(&mut self) {
        self.cells.copy_from_slice(&self.initial);
    }

    /// Counts the givens of this grid, i.e. the non-zero cells of the initial
    /// layer.
    pub fn count_givens(&self) -> usize {
        self.initial.iter().filter(|&&c| c != 0).count()
    }

    /// Returns the positions of all givens as `(column, row)` pairs in
    /// row-major order.
    pub fn given_positions(&self) -> Vec<(usize, usize)> {
        let mut positions = Vec::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if self.initial[index(column, row)] != 0 {
                    positions.push((column, row));
                }
            }
        }

        positions
    }

    /// Indicates whether this grid is full, i.e. every cell of the current
    /// layer is filled with a digit.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Indicates whether this grid is empty, i.e. no cell of the current
    /// layer is filled with a digit.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Removes the given at the specified position from both layers and
    /// returns it. The reducer uses this to carve puzzles out of a solved
    /// grid; afterwards the cell behaves like any other empty cell. Returns
    /// `None` (and changes nothing) if the coordinates are out of range or
    /// the cell holds no given.
    pub fn clear_given(&mut self, column: usize, row: usize) -> Option<u8> {
        let value = self.given(column, row)?;
        let index = index(column, row);
        self.initial[index] = 0;
        self.cells[index] = 0;
        Some(value)
    }

    /// Reinstates a given previously removed with [SudokuGrid::clear_given]
    /// in both layers. No-op unless the coordinates are in range, the value
    /// is in `[1, 9]` and the cell currently holds no given.
    pub fn restore_given(&mut self, column: usize, row: usize, value: u8) {
        if column < SIZE && row < SIZE && (1..=9).contains(&value) &&
                self.initial[index(column, row)] == 0 {
            let index = index(column, row);
            self.initial[index] = value;
            self.cells[index] = value;
        }
    }
}

impl From<SudokuGrid> for String {
    fn from(grid: SudokuGrid) -> String {
        grid.fingerprint()
    }
}

impl TryFrom<String> for SudokuGrid {
    type Error = GridParseError;

    fn try_from(code: String) -> GridParseResult<SudokuGrid> {
        SudokuGrid::parse(&code)
    }
}
