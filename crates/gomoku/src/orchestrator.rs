//! Game orchestration between players.

use crate::players::{Player, PlayerError};
use gomoku_board::{Board, BoardError, Coordinate, Piece};
use tracing::{debug, error, info, instrument};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// The named player completed a run of five.
    Winner {
        /// Winner's display name.
        name: String,
        /// Winner's piece.
        piece: Piece,
        /// The move that completed the run.
        coordinate: Coordinate,
    },
    /// The board filled up without a winner.
    Draw,
}

impl GameOutcome {
    /// Returns the winning piece if there is one.
    pub fn winner(&self) -> Option<Piece> {
        match self {
            GameOutcome::Winner { piece, .. } => Some(*piece),
            GameOutcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Winner { name, piece, .. } => write!(f, "{} ({}) wins!", name, piece),
            GameOutcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// A game that could not be played to the end.
#[derive(Debug, derive_more::Display)]
pub enum GameError {
    /// A player failed to produce a move.
    #[display("{} could not move: {}", player, source)]
    Turn {
        /// The failing player's name.
        player: String,
        /// What went wrong.
        source: PlayerError,
    },

    /// A player returned a move the board refused.
    #[display("{} returned an illegal move: {}", player, source)]
    IllegalMove {
        /// The offending player's name.
        player: String,
        /// The board's rejection.
        source: BoardError,
    },

    /// Both players were given the same piece.
    #[display("Both players play {}", _0)]
    DuplicatePiece(Piece),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Turn { source, .. } => Some(source),
            GameError::IllegalMove { source, .. } => Some(source),
            GameError::DuplicatePiece(_) => None,
        }
    }
}

/// Receives game progress, in order. Every method defaults to doing nothing.
pub trait GameObserver: Send {
    /// Called once before the first turn.
    fn on_game_start(&mut self, _board: &Board) {}

    /// Called before a player is asked for a move.
    fn on_turn_start(&mut self, _name: &str, _piece: Piece) {}

    /// Called after a move has been applied.
    fn on_move(&mut self, _name: &str, _piece: Piece, _coordinate: Coordinate, _board: &Board) {}

    /// Called once when the game ends with a result.
    fn on_game_end(&mut self, _outcome: &GameOutcome, _board: &Board) {}
}

/// Orchestrates gameplay between two players.
///
/// `first` always moves first; turns then alternate until a win or a full
/// board. Any unrecovered player failure ends the game.
pub struct Orchestrator {
    board: Board,
    players: [Box<dyn Player>; 2],
}

impl Orchestrator {
    /// Creates a new orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicatePiece`] if both players share a piece.
    #[instrument(skip_all, fields(first = first.name(), second = second.name()))]
    pub fn new(
        board: Board,
        first: Box<dyn Player>,
        second: Box<dyn Player>,
    ) -> Result<Self, GameError> {
        if first.piece() == second.piece() {
            return Err(GameError::DuplicatePiece(first.piece()));
        }
        Ok(Self {
            board,
            players: [first, second],
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs the game loop to completion.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if a player cannot move or returns an illegal
    /// move.
    #[instrument(skip_all, fields(size = self.board.size()))]
    pub async fn run(&mut self, observer: &mut dyn GameObserver) -> Result<GameOutcome, GameError> {
        info!("Starting game orchestration");
        observer.on_game_start(&self.board);

        let mut turn = 0;
        loop {
            let player = &mut self.players[turn % 2];
            let name = player.name().to_string();
            let piece = player.piece();

            observer.on_turn_start(&name, piece);
            debug!(player = %name, %piece, turn, "Waiting for move");

            let coordinate = player.get_move(&self.board).await.map_err(|source| {
                error!(player = %name, error = %source, "Turn failed");
                GameError::Turn {
                    player: name.clone(),
                    source,
                }
            })?;

            self.board
                .place(coordinate, piece)
                .map_err(|source| GameError::IllegalMove {
                    player: name.clone(),
                    source,
                })?;
            info!(player = %name, %piece, %coordinate, "Move made");
            observer.on_move(&name, piece, coordinate, &self.board);

            if self.board.check_win(coordinate) {
                let outcome = GameOutcome::Winner {
                    name,
                    piece,
                    coordinate,
                };
                return Ok(self.finish(outcome, observer));
            }
            if self.board.is_full() {
                return Ok(self.finish(GameOutcome::Draw, observer));
            }

            turn += 1;
        }
    }

    fn finish(&self, outcome: GameOutcome, observer: &mut dyn GameObserver) -> GameOutcome {
        info!(%outcome, moves = self.board.occupied_count(), "Game over");
        observer.on_game_end(&outcome, &self.board);
        outcome
    }
}
