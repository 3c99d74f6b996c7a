//! Player error types.

use crate::llm_client::LlmError;
use crate::reply::ReplyError;
use gomoku_board::BoardError;

/// Why a single request/validate attempt failed.
#[derive(Debug, Clone, derive_more::Display)]
pub enum AttemptError {
    /// The service answered without a reply body.
    #[display("Empty response")]
    EmptyResponse,

    /// The reply is not the expected structured payload.
    #[display("Malformed response ({}): {}", reason, reply)]
    MalformedResponse {
        /// The raw reply.
        reply: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The reply parsed but names an illegal cell.
    #[display("{}", _0)]
    InvalidCoordinate(BoardError),

    /// Network error, non-2xx status, or timeout.
    #[display("Service failure: {}", _0)]
    Service(LlmError),
}

impl AttemptError {
    /// True for transport/service failures, which back off before retrying.
    pub fn is_transport(&self) -> bool {
        matches!(self, AttemptError::Service(_))
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::InvalidCoordinate(e) => Some(e),
            AttemptError::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReplyError> for AttemptError {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Empty => AttemptError::EmptyResponse,
            ReplyError::Malformed { reply, reason } => {
                AttemptError::MalformedResponse { reply, reason }
            }
        }
    }
}

/// Why a player could not produce a move for its turn.
#[derive(Debug, derive_more::Display)]
pub enum PlayerError {
    /// Every attempt failed and the exhaustion policy chose to abort.
    #[display("No legal move after {} attempts; last error: {}", attempts, last_error)]
    RetriesExhausted {
        /// Attempts made this turn.
        attempts: u32,
        /// Failure of the final attempt.
        last_error: AttemptError,
    },

    /// The input stream ended before a valid move was entered.
    #[display("Input closed before a move was entered")]
    InputClosed,

    /// Reading input failed.
    #[display("Input error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayerError::RetriesExhausted { last_error, .. } => Some(last_error),
            PlayerError::Io(e) => Some(e),
            PlayerError::InputClosed => None,
        }
    }
}
