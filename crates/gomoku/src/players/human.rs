//! Human player that types move tokens.

use super::{Player, PlayerError};
use crate::console::LineSource;
use gomoku_board::{Board, Coordinate, Piece, parse_move_token};
use tracing::{debug, instrument};

/// Prompt shown before each move token.
pub const MOVE_PROMPT: &str = "Your move (row then column, e.g. 7A): ";

/// Human player reading moves from a [`LineSource`].
///
/// Re-prompts until a token parses and names an empty on-board cell.
pub struct HumanPlayer<L> {
    name: String,
    piece: Piece,
    input: L,
}

impl<L: LineSource> HumanPlayer<L> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, piece: Piece, input: L) -> Self {
        Self {
            name: name.into(),
            piece,
            input,
        }
    }
}

#[async_trait::async_trait]
impl<L: LineSource> Player for HumanPlayer<L> {
    #[instrument(skip_all)]
    async fn get_move(&mut self, board: &Board) -> Result<Coordinate, PlayerError> {
        loop {
            let Some(line) = self.input.read_line(MOVE_PROMPT).await.map_err(PlayerError::Io)?
            else {
                return Err(PlayerError::InputClosed);
            };

            let coordinate = match parse_move_token(&line, board.size()) {
                Ok(coordinate) => coordinate,
                Err(e) => {
                    debug!(player = %self.name, input = %line, error = %e, "Rejected move token");
                    self.input
                        .notice(&format!("Invalid input: {e}. Use a row then a column, like 7A."));
                    continue;
                }
            };

            match board.validate_coordinate(coordinate) {
                Ok(()) => return Ok(coordinate),
                Err(e) => {
                    debug!(player = %self.name, %coordinate, error = %e, "Rejected move");
                    self.input.notice(&format!("{e}. Choose an empty cell."));
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn piece(&self) -> Piece {
        self.piece
    }
}
