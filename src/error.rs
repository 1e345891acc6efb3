//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};

/// Miscellaneous errors that can occur on some methods in the
/// [root module](../index.html). This does not exclude errors that occur when
/// parsing grids, see [GridParseError](enum.GridParseError.html) for that.
#[derive(Debug, Eq, PartialEq)]
pub enum GridError {

    /// Indicates that a cell of a matrix handed to
    /// [SudokuGrid::from_rows](crate::SudokuGrid::from_rows) contains a value
    /// outside the range `[0, 9]`.
    InvalidDigit
}

/// Syntactic sugar for `Result<V, GridError>`.
pub type GridResult<V> = Result<V, GridError>;

/// An enumeration of the errors that may occur when parsing a textual grid
/// description. Construction refuses malformed input entirely instead of
/// truncating or padding it.
#[derive(Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that a contiguous code does not consist of exactly 81
    /// characters.
    WrongLength,

    /// Indicates that a whitespace-separated code does not consist of exactly
    /// 9 rows.
    WrongNumberOfRows,

    /// Indicates that a row of a whitespace-separated code does not consist
    /// of exactly 9 characters.
    WrongRowLength,

    /// Indicates that the code contains a character that is not a digit in
    /// the range `[0, 9]`.
    InvalidCharacter
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;

impl Display for GridParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GridParseError::WrongLength =>
                f.write_str("code must contain exactly 81 digits"),
            GridParseError::WrongNumberOfRows =>
                f.write_str("code must contain exactly 9 rows"),
            GridParseError::WrongRowLength =>
                f.write_str("every row must contain exactly 9 digits"),
            GridParseError::InvalidCharacter =>
                f.write_str("code contains a non-digit character")
        }
    }
}
