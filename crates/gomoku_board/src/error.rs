//! Errors raised by board validation and move-token parsing.

use crate::Coordinate;
use crate::board::MAX_BOARD_SIZE;

/// Why a coordinate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InvalidReason {
    /// `x` or `y` lies outside `[0, size)`.
    #[display("outside the board")]
    OutOfBounds,
    /// The cell already holds a piece.
    #[display("already occupied")]
    Occupied,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The coordinate is out of bounds or the cell is taken.
    #[display("Invalid coordinate {}: {}", coordinate, reason)]
    InvalidCoordinate {
        /// The rejected coordinate.
        coordinate: Coordinate,
        /// Which rule it broke.
        reason: InvalidReason,
    },

    /// The requested board size cannot be built or addressed.
    #[display("Invalid board size {}: must be between 1 and {}", _0, MAX_BOARD_SIZE)]
    InvalidSize(usize),

    /// Stored cells do not fill a `size × size` grid.
    #[display("Expected {} cells, found {}", expected, found)]
    CellCount {
        /// `size * size`.
        expected: usize,
        /// Cells actually present.
        found: usize,
    },

    /// A stored last move that is off the board or names an empty cell.
    #[display("Last move {} is not an occupied cell", _0)]
    InvalidLastMove(Coordinate),
}

impl std::error::Error for BoardError {}

impl BoardError {
    /// Returns the rejection reason for coordinate errors.
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            BoardError::InvalidCoordinate { reason, .. } => Some(*reason),
            BoardError::InvalidSize(_)
            | BoardError::CellCount { .. }
            | BoardError::InvalidLastMove(_) => None,
        }
    }
}

/// Raw move text that does not describe a cell at all.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Not exactly two characters after trimming.
    #[display("Expected two characters (row then column), got {:?}", _0)]
    WrongLength(String),

    /// A character outside `0-9A-F`.
    #[display("{:?} is not a base-16 digit", _0)]
    NotHexDigit(char),

    /// A digit that addresses no row or column on this board.
    #[display("{:?} is beyond the last row/column ({})", digit, last)]
    OutOfRange {
        /// The offending character.
        digit: char,
        /// The largest valid digit for the board.
        last: char,
    },
}

impl std::error::Error for InputError {}
