//! Game and agent configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use crate::players::RetrySettings;
use crate::policy::ExhaustionMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use gomoku_board::{Board, DEFAULT_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Longest base backoff accepted from config: one minute.
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Top-level configuration, usually loaded from a TOML file.
///
/// ```toml
/// board_size = 15
///
/// [agent]
/// provider = "openai"
/// model = "gpt-4o-mini"
/// base_url = "https://api.moonshot.cn/v1"
/// api_key_env = "MOONSHOT_API_KEY"
/// max_retries = 3
/// on_exhaustion = "ask"
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the board.
    board_size: usize,

    /// Remote agent settings.
    agent: AgentSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            agent: AgentSettings::default(),
        }
    }
}

/// Settings for the remote agent and its completion service.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AgentSettings {
    /// Display name in game messages.
    #[setters(into)]
    name: String,

    /// LLM provider (openai or anthropic).
    provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-20241022").
    #[setters(into)]
    model: String,

    /// Endpoint root; the provider default when unset.
    base_url: Option<String>,

    /// Environment variable with the API key; the provider default when unset.
    api_key_env: Option<String>,

    /// Maximum tokens for LLM responses.
    max_tokens: u32,

    /// Attempts per round before the exhaustion policy is asked.
    max_retries: u32,

    /// Base backoff after a transport failure, in milliseconds.
    retry_delay_ms: u64,

    /// Per-request timeout, in seconds.
    request_timeout_secs: u64,

    /// What to do when every attempt in a round fails.
    on_exhaustion: ExhaustionMode,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "Agent".to_string(),
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            api_key_env: None,
            max_tokens: 1024,
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 60,
            on_exhaustion: ExhaustionMode::Ask,
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(board_size = config.board_size, model = %config.agent.model, "Config loaded");
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be played.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        Board::new(self.board_size).map_err(|e| ConfigError::new(e.to_string()))?;
        if self.agent.max_retries == 0 {
            return Err(ConfigError::new("agent.max_retries must be at least 1"));
        }
        if self.agent.request_timeout_secs == 0 {
            return Err(ConfigError::new("agent.request_timeout_secs must be at least 1"));
        }
        if self.agent.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::new(format!(
                "agent.retry_delay_ms must be at most {MAX_RETRY_DELAY_MS}"
            )));
        }
        Ok(())
    }
}

impl AgentSettings {
    /// Creates LLM configuration from these settings.
    ///
    /// Reads the API key from `api_key_env`, or from `OPENAI_API_KEY` /
    /// `ANTHROPIC_API_KEY` by provider.
    #[instrument(skip(self), fields(provider = %self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let key_env = self
            .api_key_env
            .as_deref()
            .unwrap_or(self.provider.default_api_key_env());
        let api_key = std::env::var(key_env).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", key_env))
        })?;

        let mut config = LlmConfig::new(self.provider, api_key, self.model.clone(), self.max_tokens)
            .with_timeout(Duration::from_secs(self.request_timeout_secs));
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        Ok(config)
    }

    /// Retry budget for the agent player.
    pub fn retry_settings(&self) -> RetrySettings {
        RetrySettings {
            max_attempts: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
