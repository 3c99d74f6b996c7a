//! AI agent player that asks a completion service for moves.

use super::{AttemptError, Player, PlayerError};
use crate::llm_client::CompletionService;
use crate::policy::{ExhaustedTurn, ExhaustionDecision, ExhaustionPolicy};
use crate::prompts;
use crate::reply::parse_reply;
use crate::transcript::Transcript;
use gomoku_board::{Board, Coordinate, Piece};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Attempt budget and backoff for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Attempts per round; at least one is always made.
    pub max_attempts: u32,
    /// Base delay after a transport failure, multiplied by the attempt number.
    pub retry_delay: Duration,
}

impl RetrySettings {
    /// Delay after the `attempt`-th transport failure: `retry_delay * attempt`,
    /// saturating instead of overflowing.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Agent player backed by a [`CompletionService`].
///
/// Owns its [`Transcript`] for the whole game. Each turn appends the board,
/// then retries until a reply parses and names a legal cell, feeding
/// corrective messages back on illegal cells. When a round of attempts runs
/// out, the [`ExhaustionPolicy`] decides whether to go again.
pub struct AgentPlayer<S> {
    name: String,
    piece: Piece,
    service: S,
    transcript: Transcript,
    retry: RetrySettings,
    policy: Box<dyn ExhaustionPolicy>,
}

impl<S: CompletionService> AgentPlayer<S> {
    /// Creates a new agent player, seeding its transcript with the system
    /// prompt.
    #[instrument(skip(name, service, policy), fields(name = %name.as_ref()))]
    pub fn new(
        name: impl AsRef<str>,
        piece: Piece,
        service: S,
        retry: RetrySettings,
        policy: Box<dyn ExhaustionPolicy>,
    ) -> Self {
        info!("Creating agent player");
        Self {
            name: name.as_ref().to_string(),
            piece,
            service,
            transcript: Transcript::new(prompts::system_prompt(piece)),
            retry: RetrySettings {
                max_attempts: retry.max_attempts.max(1),
                ..retry
            },
            policy,
        }
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The retry budget in effect.
    pub fn retry_settings(&self) -> RetrySettings {
        self.retry
    }

    /// One request/parse/validate cycle.
    async fn attempt(&mut self, board: &Board) -> Result<Coordinate, AttemptError> {
        let reply = self
            .service
            .complete(&self.transcript)
            .await
            .map_err(AttemptError::Service)?
            .ok_or(AttemptError::EmptyResponse)?;

        let parsed = parse_reply(&reply)?;
        debug!(
            agent = %self.name,
            coordinate = %parsed.coordinate(),
            reasoning = %parsed.reasoning(),
            "Agent proposed a move"
        );

        // The agent sees its own answer next time, accepted or not.
        self.transcript.push_assistant(reply);

        let coordinate = *parsed.coordinate();
        if let Err(e) = board.validate_coordinate(coordinate) {
            self.transcript.push_user(prompts::invalid_move_prompt(
                board, self.piece, coordinate, &e,
            ));
            return Err(AttemptError::InvalidCoordinate(e));
        }
        Ok(coordinate)
    }

    /// Up to `max_attempts` attempts. Returns the last failure if none
    /// succeeds.
    async fn round(&mut self, board: &Board) -> Result<Coordinate, AttemptError> {
        let mut attempt = 1;
        loop {
            match self.attempt(board).await {
                Ok(coordinate) => return Ok(coordinate),
                Err(e) if attempt >= self.retry.max_attempts => return Err(e),
                Err(e) => {
                    warn!(
                        agent = %self.name,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "Move attempt failed"
                    );
                    if e.is_transport() {
                        let delay = self.retry.backoff(attempt);
                        debug!(?delay, "Backing off before next attempt");
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: CompletionService> Player for AgentPlayer<S> {
    #[instrument(skip_all)]
    async fn get_move(&mut self, board: &Board) -> Result<Coordinate, PlayerError> {
        self.transcript
            .push_user(prompts::turn_prompt(board, self.piece));

        let mut rounds = 0;
        loop {
            rounds += 1;
            let last_error = match self.round(board).await {
                Ok(coordinate) => {
                    info!(
                        agent = %self.name,
                        %coordinate,
                        transcript_length = self.transcript.len(),
                        transcript_chars = self.transcript.content_length(),
                        "Agent chose a move"
                    );
                    return Ok(coordinate);
                }
                Err(e) => e,
            };

            let attempts = rounds * self.retry.max_attempts;
            warn!(agent = %self.name, attempts, error = %last_error, "Retry budget exhausted");

            let turn = ExhaustedTurn::new(&self.name, attempts, rounds, &last_error);
            match self.policy.decide(&turn).await {
                ExhaustionDecision::Retry => {
                    info!(agent = %self.name, rounds, "Starting another round of attempts");
                }
                ExhaustionDecision::Abort => {
                    return Err(PlayerError::RetriesExhausted {
                        attempts,
                        last_error,
                    });
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
