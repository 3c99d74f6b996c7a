//! Gomoku library - five-in-a-row against an LLM agent.
//!
//! The remote agent is an unreliable oracle: it may answer with prose,
//! malformed JSON, or a cell that is already taken. [`AgentPlayer`] turns it
//! into a source of legal moves by parsing every reply, validating it against
//! the [`Board`], feeding corrective messages back into its [`Transcript`], and
//! retrying within a bounded budget.
//!
//! # Architecture
//!
//! - **Players**: [`HumanPlayer`] (line input) and [`AgentPlayer`] (completion
//!   service) behind the [`Player`] trait
//! - **LLM client**: [`LlmClient`] for OpenAI-compatible and Anthropic endpoints
//! - **Orchestrator**: the turn loop, reporting to a [`GameObserver`]
//! - **Config**: [`GameConfig`] loaded from TOML and the environment
//!
//! # Example
//!
//! ```no_run
//! use gomoku::{
//!     AbortOnExhaustion, AgentPlayer, Board, ConsoleObserver, GameConfig, LlmClient,
//!     Orchestrator, Piece,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let client = LlmClient::new(config.agent().create_llm_config()?)?;
//! let agent = |name: &str, piece| {
//!     AgentPlayer::new(
//!         name,
//!         piece,
//!         client.clone(),
//!         config.agent().retry_settings(),
//!         Box::new(AbortOnExhaustion),
//!     )
//! };
//!
//! let mut game = Orchestrator::new(
//!     Board::new(*config.board_size())?,
//!     Box::new(agent("Agent X", Piece::X)),
//!     Box::new(agent("Agent O", Piece::O)),
//! )?;
//! let outcome = game.run(&mut ConsoleObserver::new()).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod llm_client;
mod orchestrator;
mod players;
mod policy;
mod prompts;
mod render;
mod reply;
mod transcript;

// Crate-level exports - Configuration
pub use config::{AgentSettings, ConfigError, GameConfig, MAX_RETRY_DELAY_MS};

// Crate-level exports - Console input
pub use console::{Console, LineSource};

// Crate-level exports - LLM client
pub use llm_client::{CompletionService, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Game loop
pub use orchestrator::{GameError, GameObserver, GameOutcome, Orchestrator};

// Crate-level exports - Players
pub use players::{
    AgentPlayer, AttemptError, HumanPlayer, MOVE_PROMPT, Player, PlayerError, RetrySettings,
};

// Crate-level exports - Exhaustion policies
pub use policy::{
    AbortOnExhaustion, ConfirmOnExhaustion, ExhaustedTurn, ExhaustionDecision, ExhaustionMode,
    ExhaustionPolicy,
};

// Crate-level exports - Prompts, replies and transcript
pub use prompts::{invalid_move_prompt, last_move_note, system_prompt, turn_prompt};
pub use reply::{AgentReply, ReplyError, parse_reply, strip_code_fence};
pub use transcript::{Message, Role, Transcript};

// Crate-level exports - Terminal rendering
pub use render::{ConsoleObserver, render_colored};

// Crate-level exports - Board types
pub use gomoku_board::{
    Axis, Board, BoardError, Cell, Coordinate, DEFAULT_BOARD_SIZE, InputError, InvalidReason,
    MAX_BOARD_SIZE, Piece, WIN_LENGTH, parse_move_token,
};
