//! The square grid of cells.

use crate::token::hex_digit;
use crate::{BoardError, Cell, Coordinate, InvalidReason, Piece};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Largest side length a single base-16 digit can address.
pub const MAX_BOARD_SIZE: usize = 16;

/// Standard board side length.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Glyph rendered for empty cells.
pub const EMPTY_GLYPH: char = '·';

/// A `size × size` five-in-a-row board.
///
/// Cells only ever go from [`Cell::Empty`] to [`Cell::Occupied`], one per
/// accepted [`Board::place`].
///
/// Deserialization runs the same checks as [`Board::new`], and also checks
/// the cell count and that `last_move` names an occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    last_move: Option<Coordinate>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
    last_move: Option<Coordinate>,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut board = Board::new(raw.size)?;
        if raw.cells.len() != board.cells.len() {
            return Err(BoardError::CellCount {
                expected: board.cells.len(),
                found: raw.cells.len(),
            });
        }
        board.cells = raw.cells;

        if let Some(last) = raw.last_move {
            match board.get(last) {
                Some(Cell::Occupied(_)) => board.last_move = Some(last),
                _ => return Err(BoardError::InvalidLastMove(last)),
            }
        }
        Ok(board)
    }
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] when `size` is zero or larger than
    /// [`MAX_BOARD_SIZE`].
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            last_move: None,
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The most recently placed coordinate, `None` before the first move.
    pub fn last_move(&self) -> Option<Coordinate> {
        self.last_move
    }

    /// Gets the cell at `coordinate`, or `None` when it is off the board.
    pub fn get(&self, coordinate: Coordinate) -> Option<Cell> {
        self.index(coordinate).map(|i| self.cells[i])
    }

    /// Checks that `coordinate` is on the board and empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidCoordinate`] with
    /// [`InvalidReason::OutOfBounds`] or [`InvalidReason::Occupied`].
    #[instrument(skip(self), fields(size = self.size))]
    pub fn validate_coordinate(&self, coordinate: Coordinate) -> Result<(), BoardError> {
        let reason = match self.get(coordinate) {
            None => InvalidReason::OutOfBounds,
            Some(Cell::Occupied(_)) => InvalidReason::Occupied,
            Some(Cell::Empty) => return Ok(()),
        };
        debug!(%coordinate, %reason, "Coordinate rejected");
        Err(BoardError::InvalidCoordinate { coordinate, reason })
    }

    /// Places `piece` at `coordinate` after validating it.
    ///
    /// Exactly one cell changes and `last_move` is updated. Nothing changes on
    /// error.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::validate_coordinate`] failures.
    #[instrument(skip(self))]
    pub fn place(&mut self, coordinate: Coordinate, piece: Piece) -> Result<(), BoardError> {
        self.validate_coordinate(coordinate)?;
        if let Some(i) = self.index(coordinate) {
            self.cells[i] = Cell::Occupied(piece);
            self.last_move = Some(coordinate);
        }
        Ok(())
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Number of placed pieces.
    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// All on-board coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coordinate::new(x, y)))
    }

    /// Renders the board as plain text.
    ///
    /// A header of base-16 column indices, then one line per row prefixed by
    /// its base-16 index, cells separated by single spaces:
    ///
    /// ```text
    ///   0 1 2
    /// 0 X · ·
    /// 1 · O ·
    /// 2 · · ·
    /// ```
    pub fn render(&self) -> String {
        let header: Vec<String> = (0..self.size).map(|i| hex_digit(i).to_string()).collect();
        let mut lines = vec![format!("  {}", header.join(" "))];

        for (y, row) in self.cells.chunks(self.size).enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => EMPTY_GLYPH.to_string(),
                    Cell::Occupied(piece) => piece.glyph().to_string(),
                })
                .collect();
            lines.push(format!("{} {}", hex_digit(y), cells.join(" ")));
        }

        lines.join("\n")
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
