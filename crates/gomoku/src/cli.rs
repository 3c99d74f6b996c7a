//! Command-line interface for gomoku.

use clap::{Args, Parser, Subcommand};
use gomoku::{ExhaustionMode, LlmProvider};
use std::path::PathBuf;

/// Gomoku - five in a row against an LLM agent
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Play five-in-a-row against an LLM agent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play as X against the agent (you move first)
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// What to do when the agent runs out of attempts
        #[arg(long, value_enum)]
        on_exhaustion: Option<ExhaustionMode>,
    },

    /// Watch two agents play each other
    Watch {
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Overrides shared by every game command.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Board side length
    #[arg(short, long)]
    pub size: Option<usize>,

    /// LLM provider
    #[arg(long, value_enum)]
    pub provider: Option<LlmProvider>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Attempts per round before giving up or asking
    #[arg(long)]
    pub max_retries: Option<u32>,
}
