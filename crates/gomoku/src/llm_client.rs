//! LLM API client for OpenAI-compatible and Anthropic endpoints.

use crate::transcript::{Role, Transcript};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
    },
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// LLM provider selection.
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
pub enum LlmProvider {
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    #[default]
    #[value(name = "openai")]
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Base URL used when none is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    /// Environment variable holding the API key when none is configured.
    pub fn default_api_key_env(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct LlmConfig {
    /// Which wire format to speak.
    provider: LlmProvider,
    /// Secret sent with every request.
    api_key: String,
    /// Model identifier.
    model: String,
    /// Upper bound on reply tokens.
    max_tokens: u32,
    /// Endpoint root, without the trailing path.
    #[setters(into)]
    base_url: String,
    /// Per-request timeout; a hung call counts as a transport failure.
    timeout: Duration,
}

impl LlmConfig {
    /// Creates a new LLM configuration using the provider's default endpoint.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            base_url: provider.default_base_url().to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// A text-completion service that answers a whole transcript.
///
/// `Ok(None)` means the service answered without a reply body.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the transcript and asks for a JSON object reply.
    async fn complete(&self, transcript: &Transcript) -> Result<Option<String>, LlmError>;
}

#[async_trait::async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Arc<T> {
    async fn complete(&self, transcript: &Transcript) -> Result<Option<String>, LlmError> {
        (**self).complete(transcript).await
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
    openai: OpenAIClient<OpenAIConfig>,
}

impl LlmClient {
    /// Creates a new LLM client.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the HTTP client cannot be built.
    #[instrument(skip(config), fields(provider = %config.provider(), model = %config.model()))]
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        info!("Creating LLM client");
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build HTTP client: {}", e)))?;
        let openai = OpenAIClient::with_config(
            OpenAIConfig::new()
                .with_api_key(config.api_key.clone())
                .with_api_base(config.base_url.trim_end_matches('/')),
        );
        Ok(Self {
            config,
            http,
            openai,
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Chat completion request carrying the whole transcript, in JSON mode.
    fn openai_request(
        &self,
        transcript: &Transcript,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let messages = transcript
            .messages()
            .iter()
            .map(|m| openai_message(*m.role(), m.content()))
            .collect::<Result<Vec<_>, _>>()?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build request");
                LlmError::new(format!("Failed to build request: {}", e))
            })
    }

    /// Request body for the Anthropic messages API.
    ///
    /// System messages are joined into the top-level `system` field.
    fn anthropic_body(&self, transcript: &Transcript) -> serde_json::Value {
        let system = transcript
            .messages()
            .iter()
            .filter(|m| *m.role() == Role::System)
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let messages: Vec<_> = transcript
            .messages()
            .iter()
            .filter(|m| *m.role() != Role::System)
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system,
            "messages": messages,
        })
    }

    /// Posts `body` and returns the response JSON, mapping transport and
    /// status failures to [`LlmError`].
    #[instrument(skip(self, request, body))]
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmError> {
        let response = request.json(body).send().await.map_err(|e| {
            error!(error = ?e, "LLM API request failed");
            LlmError::new(format!("{} API request failed: {}", self.config.provider, e))
        })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read LLM response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "LLM API error");
            return Err(LlmError::new(format!(
                "{} API error {}: {}",
                self.config.provider, status, response_text
            )));
        }

        debug!(response_length = response_text.len(), "Parsing LLM response");
        serde_json::from_str(&response_text).map_err(|e| {
            error!(error = ?e, response = %response_text, "Failed to parse LLM response");
            LlmError::new(format!("Failed to parse response: {}", e))
        })
    }

    /// Completes using an OpenAI-compatible endpoint.
    #[instrument(skip(self, transcript))]
    async fn complete_openai(&self, transcript: &Transcript) -> Result<Option<String>, LlmError> {
        let request = self.openai_request(transcript)?;

        debug!(base_url = %self.config.base_url, "Sending request to OpenAI-compatible endpoint");
        let response = tokio::time::timeout(self.config.timeout, self.openai.chat().create(request))
            .await
            .map_err(|_| {
                error!(timeout = ?self.config.timeout, "OpenAI request timed out");
                LlmError::new(format!(
                    "OpenAI API request timed out after {:?}",
                    self.config.timeout
                ))
            })?
            .map_err(|e| {
                error!(error = ?e, "OpenAI API error");
                LlmError::new(format!("OpenAI API error: {}", e))
            })?;

        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone()))
    }

    /// Completes using Anthropic Claude.
    #[instrument(skip(self, transcript))]
    async fn complete_anthropic(
        &self,
        transcript: &Transcript,
    ) -> Result<Option<String>, LlmError> {
        let url = format!("{}/messages", self.config.base_url.trim_end_matches('/'));
        debug!(%url, "Sending request to Anthropic");

        let request = self
            .http
            .post(url)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", "2023-06-01");
        let response = self.send(request, &self.anthropic_body(transcript)).await?;
        Ok(anthropic_content(&response))
    }
}

#[async_trait::async_trait]
impl CompletionService for LlmClient {
    #[instrument(
        skip(self, transcript),
        fields(provider = %self.config.provider, model = %self.config.model, messages = transcript.len())
    )]
    async fn complete(&self, transcript: &Transcript) -> Result<Option<String>, LlmError> {
        debug!("Generating completion");
        let content = match self.config.provider {
            LlmProvider::OpenAI => self.complete_openai(transcript).await?,
            LlmProvider::Anthropic => self.complete_anthropic(transcript).await?,
        };
        info!(
            content_length = ?content.as_ref().map(String::len),
            "Generated completion"
        );
        Ok(content)
    }
}

/// One transcript entry as an OpenAI chat message.
fn openai_message(role: Role, content: &str) -> Result<ChatCompletionRequestMessage, LlmError> {
    let built = match role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::System),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::User),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(ChatCompletionRequestMessage::Assistant),
    };
    built.map_err(|e| {
        error!(error = ?e, %role, "Failed to build message");
        LlmError::new(format!("Failed to build {} message: {}", role, e))
    })
}

/// `content[0].text`; missing is no reply.
fn anthropic_content(response: &serde_json::Value) -> Option<String> {
    response["content"][0]["text"].as_str().map(str::to_string)
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(provider: LlmProvider) -> LlmClient {
        let config = LlmConfig::new(provider, "key".to_string(), "test-model".to_string(), 256);
        LlmClient::new(config).unwrap()
    }

    fn transcript() -> Transcript {
        let mut transcript = Transcript::new("You play O.");
        transcript.push_user("Your turn.");
        transcript.push_assistant("{\"coordinate\": {\"x\": 1, \"y\": 2}}");
        transcript
    }

    #[test]
    fn test_openai_request_sends_whole_transcript_and_json_mode() {
        let request = client(LlmProvider::OpenAI)
            .openai_request(&transcript())
            .unwrap();
        assert_eq!(request.model, "test-model");
        assert!(matches!(request.response_format, Some(ResponseFormat::JsonObject)));
        assert_eq!(request.messages.len(), 3);
        assert!(matches!(request.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(request.messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(request.messages[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn test_anthropic_body_lifts_system_message() {
        let body = client(LlmProvider::Anthropic).anthropic_body(&transcript());
        assert_eq!(body["system"], "You play O.");
        assert_eq!(body["max_tokens"], 256);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[test]
    fn test_anthropic_content_extraction() {
        let anthropic = serde_json::json!({"content": [{"type": "text", "text": "hi"}]});
        assert_eq!(anthropic_content(&anthropic), Some("hi".to_string()));
        assert_eq!(anthropic_content(&serde_json::json!({"content": []})), None);
    }

    #[test]
    fn test_config_defaults_follow_provider() {
        let config = LlmConfig::new(LlmProvider::Anthropic, "k".into(), "m".into(), 10);
        assert_eq!(config.base_url(), "https://api.anthropic.com/v1");

        let config = config.with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url(), "http://localhost:8080/v1/");
        assert_eq!(LlmProvider::OpenAI.to_string(), "openai");
    }
}
