//! Integration test for LLM client connectivity.

use gomoku::{
    AbortOnExhaustion, AgentPlayer, Board, CompletionService, LlmClient, LlmConfig, LlmProvider,
    Piece, Player, RetrySettings, Transcript,
};
use tracing::instrument;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");

    let config = LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-20241022".to_string(),
        50,
    );

    let client = LlmClient::new(config).expect("Failed to build client");

    let mut transcript = Transcript::new("You are a helpful assistant.");
    transcript.push_user("Reply with the JSON object {\"greeting\": \"hello\"} and nothing else.");
    let response = client
        .complete(&transcript)
        .await
        .expect("Failed to generate")
        .expect("Empty reply");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_agent_returns_legal_move() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let config = LlmConfig::new(LlmProvider::OpenAI, api_key, "gpt-4o-mini".to_string(), 300);
    let client = LlmClient::new(config).expect("Failed to build client");

    let mut player = AgentPlayer::new(
        "Agent",
        Piece::O,
        client,
        RetrySettings::default(),
        Box::new(AbortOnExhaustion),
    );

    let board = Board::new(15).unwrap();
    let coordinate = player.get_move(&board).await.expect("Failed to get move");

    assert!(board.validate_coordinate(coordinate).is_ok());
    eprintln!("Agent chose {}", coordinate);
}
