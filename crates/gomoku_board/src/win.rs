//! Win detection: contiguous runs through the last placed piece.

use crate::{Board, Cell, Coordinate, Piece};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Run length that wins the game. Longer runs also win.
pub const WIN_LENGTH: usize = 5;

/// The four lines a run can lie along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Axis {
    /// Unit step in the axis' forward direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

impl Board {
    /// Length of the run of same pieces through `coordinate` along `axis`.
    ///
    /// Zero when the cell is empty or off the board.
    pub fn run_length(&self, coordinate: Coordinate, axis: Axis) -> usize {
        let Some(Cell::Occupied(piece)) = self.get(coordinate) else {
            return 0;
        };
        let (dx, dy) = axis.step();
        1 + self.walk(coordinate, piece, dx, dy) + self.walk(coordinate, piece, -dx, -dy)
    }

    /// True iff the piece at `coordinate` sits in a run of at least
    /// [`WIN_LENGTH`] along any axis.
    #[instrument(skip(self))]
    pub fn check_win(&self, coordinate: Coordinate) -> bool {
        let won = Axis::iter().any(|axis| self.run_length(coordinate, axis) >= WIN_LENGTH);
        if won {
            debug!(%coordinate, "Winning run found");
        }
        won
    }

    /// Cells of the first winning run through `coordinate`, ordered along the
    /// axis.
    pub fn winning_line(&self, coordinate: Coordinate) -> Option<Vec<Coordinate>> {
        let piece = self.get(coordinate)?.piece()?;
        let axis = Axis::iter().find(|axis| self.run_length(coordinate, *axis) >= WIN_LENGTH)?;
        let (dx, dy) = axis.step();

        let back = self.walk(coordinate, piece, -dx, -dy) as i32;
        let start = coordinate.offset(-dx * back, -dy * back);
        let len = self.run_length(coordinate, axis) as i32;
        Some((0..len).map(|i| start.offset(dx * i, dy * i)).collect())
    }

    /// Counts same-piece cells stepping away from `from`, excluding `from`.
    fn walk(&self, from: Coordinate, piece: Piece, dx: i32, dy: i32) -> usize {
        let mut count = 0;
        let mut next = from.offset(dx, dy);
        while self.get(next) == Some(Cell::Occupied(piece)) {
            count += 1;
            next = next.offset(dx, dy);
        }
        count
    }
}
