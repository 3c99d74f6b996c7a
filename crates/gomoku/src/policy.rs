//! What to do when a turn's retry budget runs out.
//!
//! The agent player never invents a fallback move. Once every attempt in a
//! round has failed it asks an [`ExhaustionPolicy`], which either starts
//! another round or gives up on the turn.

use crate::console::LineSource;
use crate::players::AttemptError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Summary of a round in which every attempt failed.
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct ExhaustedTurn<'a> {
    /// Name of the player whose turn it is.
    pub player: &'a str,
    /// Attempts made so far this turn, across all rounds.
    pub attempts: u32,
    /// Rounds completed so far this turn.
    pub rounds: u32,
    /// The failure of the final attempt.
    pub last_error: &'a AttemptError,
}

/// Outcome of an [`ExhaustionPolicy`] decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExhaustionDecision {
    /// Run another full round of attempts.
    Retry,
    /// Fail the turn.
    Abort,
}

/// Decides between retrying and aborting after an exhausted round.
#[async_trait::async_trait]
pub trait ExhaustionPolicy: Send {
    /// Called once per exhausted round.
    async fn decide(&mut self, turn: &ExhaustedTurn<'_>) -> ExhaustionDecision;
}

/// Configured exhaustion behavior.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExhaustionMode {
    /// Ask on the console whether to keep trying.
    #[default]
    Ask,
    /// Fail the turn, and with it the game.
    Abort,
}

/// Always aborts. For unattended games.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnExhaustion;

#[async_trait::async_trait]
impl ExhaustionPolicy for AbortOnExhaustion {
    #[instrument(skip(self, turn), fields(player = turn.player, attempts = turn.attempts))]
    async fn decide(&mut self, turn: &ExhaustedTurn<'_>) -> ExhaustionDecision {
        warn!(last_error = %turn.last_error, "Retry budget exhausted, aborting turn");
        ExhaustionDecision::Abort
    }
}

/// Asks the user whether to keep retrying. Defaults to abort.
#[derive(Debug, Clone)]
pub struct ConfirmOnExhaustion<L> {
    input: L,
}

impl<L: LineSource> ConfirmOnExhaustion<L> {
    /// Creates a policy that asks through `input`.
    pub fn new(input: L) -> Self {
        Self { input }
    }
}

#[async_trait::async_trait]
impl<L: LineSource> ExhaustionPolicy for ConfirmOnExhaustion<L> {
    #[instrument(skip(self, turn), fields(player = turn.player, attempts = turn.attempts))]
    async fn decide(&mut self, turn: &ExhaustedTurn<'_>) -> ExhaustionDecision {
        self.input.notice(&format!(
            "{} failed to produce a legal move after {} attempts: {}",
            turn.player, turn.attempts, turn.last_error
        ));

        let answer = match self.input.read_line("Keep trying? [y/N] ").await {
            Ok(Some(line)) => line,
            Ok(None) => return ExhaustionDecision::Abort,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                return ExhaustionDecision::Abort;
            }
        };

        let decision = match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => ExhaustionDecision::Retry,
            _ => ExhaustionDecision::Abort,
        };
        info!(?decision, "User decided on exhausted turn");
        decision
    }
}
