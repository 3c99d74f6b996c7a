//! Pure five-in-a-row board logic.
//!
//! This crate owns the grid, move validation, win detection and the plain
//! text rendering used to describe a position to a remote agent. It performs
//! no I/O.
//!
//! # Example
//!
//! ```
//! use gomoku_board::{Board, Coordinate, Piece};
//!
//! let mut board = Board::new(15).unwrap();
//! for x in 3..8 {
//!     board.place(Coordinate::new(x, 7), Piece::X).unwrap();
//! }
//! assert!(board.check_win(Coordinate::new(7, 7)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod token;
mod types;
mod win;

pub use board::{Board, DEFAULT_BOARD_SIZE, EMPTY_GLYPH, MAX_BOARD_SIZE};
pub use error::{BoardError, InputError, InvalidReason};
pub use token::{hex_digit, parse_move_token};
pub use types::{Cell, Coordinate, Piece};
pub use win::{Axis, WIN_LENGTH};
