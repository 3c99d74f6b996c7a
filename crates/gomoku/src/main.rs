//! Gomoku - terminal five-in-a-row against an LLM agent.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use gomoku::{
    AbortOnExhaustion, AgentPlayer, Board, Console, ConfirmOnExhaustion, ConsoleObserver,
    ExhaustionMode, ExhaustionPolicy, GameConfig, HumanPlayer, LlmClient, Orchestrator, Piece,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    match cli.command {
        Command::Play {
            game,
            on_exhaustion,
        } => {
            apply_overrides(&mut config, &game);
            if let Some(mode) = on_exhaustion {
                let agent = config.agent().clone().with_on_exhaustion(mode);
                config = config.with_agent(agent);
            }
            config.validate()?;
            run_play(config).await
        }
        Command::Watch { game } => {
            apply_overrides(&mut config, &game);
            config.validate()?;
            run_watch(config).await
        }
    }
}

/// Applies command-line overrides on top of the file config.
fn apply_overrides(config: &mut GameConfig, args: &GameArgs) {
    let mut agent = config.agent().clone();
    if let Some(provider) = args.provider {
        agent = agent.with_provider(provider);
    }
    if let Some(model) = &args.model {
        agent = agent.with_model(model.clone());
    }
    if let Some(max_retries) = args.max_retries {
        agent = agent.with_max_retries(max_retries);
    }

    let mut updated = config.clone().with_agent(agent);
    if let Some(size) = args.size {
        updated = updated.with_board_size(size);
    }
    *config = updated;
}

/// Human (X, moves first) against the agent (O).
#[instrument(skip(config), fields(size = config.board_size(), model = %config.agent().model()))]
async fn run_play(config: GameConfig) -> Result<()> {
    info!("Starting human vs agent game");

    let client = LlmClient::new(config.agent().create_llm_config()?)?;
    let console = Console::stdin();

    let policy: Box<dyn ExhaustionPolicy> = match config.agent().on_exhaustion() {
        ExhaustionMode::Ask => Box::new(ConfirmOnExhaustion::new(console.clone())),
        ExhaustionMode::Abort => Box::new(AbortOnExhaustion),
    };

    let human = HumanPlayer::new("You", Piece::X, console);
    let agent = AgentPlayer::new(
        config.agent().name(),
        Piece::O,
        client,
        config.agent().retry_settings(),
        policy,
    );

    let mut game = Orchestrator::new(
        Board::new(*config.board_size())?,
        Box::new(human),
        Box::new(agent),
    )?;
    let outcome = game
        .run(&mut ConsoleObserver::new())
        .await
        .context("Game ended early")?;
    info!(%outcome, "Game finished");
    Ok(())
}

/// Two agents sharing one client. Nobody is there to confirm retries.
#[instrument(skip(config), fields(size = config.board_size(), model = %config.agent().model()))]
async fn run_watch(config: GameConfig) -> Result<()> {
    info!("Starting agent vs agent game");

    let client = LlmClient::new(config.agent().create_llm_config()?)?;
    let name = config.agent().name();
    let agent = |piece: Piece| {
        AgentPlayer::new(
            format!("{name} {piece}"),
            piece,
            client.clone(),
            config.agent().retry_settings(),
            Box::new(AbortOnExhaustion),
        )
    };

    let mut game = Orchestrator::new(
        Board::new(*config.board_size())?,
        Box::new(agent(Piece::X)),
        Box::new(agent(Piece::O)),
    )?;
    let outcome = game
        .run(&mut ConsoleObserver::new())
        .await
        .context("Game ended early")?;
    info!(%outcome, "Game finished");
    Ok(())
}
