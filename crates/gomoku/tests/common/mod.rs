//! Scripted stand-ins for the network, the keyboard and the opponent.

#![allow(dead_code)]

use gomoku::{
    AttemptError, Board, CompletionService, Coordinate, ExhaustedTurn, ExhaustionDecision,
    ExhaustionPolicy, GameObserver, GameOutcome, LineSource, LlmError, Piece, Player, PlayerError,
    RetrySettings, Transcript,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Retry budget with no backoff.
pub fn fast_retry(max_attempts: u32) -> RetrySettings {
    RetrySettings {
        max_attempts,
        retry_delay: Duration::ZERO,
    }
}

/// A JSON move reply.
pub fn reply(x: i32, y: i32) -> Result<Option<String>, LlmError> {
    Ok(Some(format!(
        "{{\"reasoning\": \"scripted\", \"coordinate\": {{\"x\": {x}, \"y\": {y}}}}}"
    )))
}

/// A raw text reply.
pub fn text(content: &str) -> Result<Option<String>, LlmError> {
    Ok(Some(content.to_string()))
}

/// Answers from a fixed script and records every transcript it was sent.
#[derive(Clone, Default)]
pub struct ScriptedService {
    replies: Arc<Mutex<VecDeque<Result<Option<String>, LlmError>>>>,
    seen: Arc<Mutex<Vec<Transcript>>>,
}

impl ScriptedService {
    pub fn new(replies: impl IntoIterator<Item = Result<Option<String>, LlmError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            seen: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<Transcript> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, transcript: &Transcript) -> Result<Option<String>, LlmError> {
        self.seen.lock().unwrap().push(transcript.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::new("script exhausted")))
    }
}

/// Lines from a fixed script. Records prompts and notices.
#[derive(Clone, Default)]
pub struct ScriptedLines {
    lines: Arc<Mutex<VecDeque<String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub notices: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLines {
    pub fn new<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines.into_iter().map(str::to_string).collect())),
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LineSource for ScriptedLines {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.lines.lock().unwrap().pop_front())
    }

    fn notice(&mut self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Plays a fixed list of moves without checking them.
pub struct ScriptedPlayer {
    name: String,
    piece: Piece,
    moves: VecDeque<Coordinate>,
}

impl ScriptedPlayer {
    pub fn new(name: &str, piece: Piece, moves: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            name: name.to_string(),
            piece,
            moves: moves.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn get_move(&mut self, _board: &Board) -> Result<Coordinate, PlayerError> {
        self.moves.pop_front().ok_or(PlayerError::InputClosed)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn piece(&self) -> Piece {
        self.piece
    }
}

/// Observer events, in the order they arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Turn(String, Piece),
    Move(Piece, Coordinate),
    End(GameOutcome),
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<Event>,
}

impl GameObserver for RecordingObserver {
    fn on_game_start(&mut self, _board: &Board) {
        self.events.push(Event::Start);
    }

    fn on_turn_start(&mut self, name: &str, piece: Piece) {
        self.events.push(Event::Turn(name.to_string(), piece));
    }

    fn on_move(&mut self, _name: &str, piece: Piece, coordinate: Coordinate, _board: &Board) {
        self.events.push(Event::Move(piece, coordinate));
    }

    fn on_game_end(&mut self, outcome: &GameOutcome, _board: &Board) {
        self.events.push(Event::End(outcome.clone()));
    }
}

/// Retries a fixed number of times, then aborts. Records what it was shown.
#[derive(Clone, Default)]
pub struct CountingPolicy {
    retries_left: Arc<Mutex<u32>>,
    pub seen: Arc<Mutex<Vec<(u32, u32, AttemptError)>>>,
}

impl CountingPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries_left: Arc::new(Mutex::new(retries)),
            seen: Arc::default(),
        }
    }

    /// `(attempts, rounds, last_error)` per decision.
    pub fn seen(&self) -> Vec<(u32, u32, AttemptError)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ExhaustionPolicy for CountingPolicy {
    async fn decide(&mut self, turn: &ExhaustedTurn<'_>) -> ExhaustionDecision {
        self.seen
            .lock()
            .unwrap()
            .push((turn.attempts, turn.rounds, turn.last_error.clone()));
        let mut left = self.retries_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            ExhaustionDecision::Retry
        } else {
            ExhaustionDecision::Abort
        }
    }
}
