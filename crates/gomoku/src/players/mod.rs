//! Player trait and implementations.

mod agent;
mod error;
mod human;

pub use agent::{AgentPlayer, RetrySettings};
pub use error::{AttemptError, PlayerError};
pub use human::{HumanPlayer, MOVE_PROMPT};

use gomoku_board::{Board, Coordinate, Piece};

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// The returned coordinate has passed
    /// [`Board::validate_coordinate`] against `board`.
    async fn get_move(&mut self, board: &Board) -> Result<Coordinate, PlayerError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Returns the piece this player places.
    fn piece(&self) -> Piece;
}
