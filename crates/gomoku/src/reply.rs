//! Parsing the agent's structured reply.
//!
//! Expected shape:
//!
//! ```json
//! { "reasoning": "...", "coordinate": { "x": 7, "y": 8 } }
//! ```
//!
//! Extra fields are ignored and a missing `reasoning` reads as empty. A
//! missing `coordinate`, a missing component, or a component that is not a
//! whole number is a [`ReplyError::Malformed`]. Whole-number floats (`7.0`)
//! are accepted, and integers beyond `i32` saturate so the board rejects them
//! as out of bounds.

use derive_getters::Getters;
use gomoku_board::Coordinate;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

/// A successfully parsed agent reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct AgentReply {
    /// Free-text explanation of the move.
    #[serde(default)]
    reasoning: String,
    /// The chosen cell.
    #[serde(deserialize_with = "whole_coordinate")]
    coordinate: Coordinate,
}

/// Coordinate components as any JSON number.
#[derive(Deserialize)]
struct WireCoordinate {
    x: serde_json::Number,
    y: serde_json::Number,
}

fn whole_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coordinate, D::Error> {
    let wire = WireCoordinate::deserialize(deserializer)?;
    Ok(Coordinate::new(whole(&wire.x, "x")?, whole(&wire.y, "y")?))
}

/// A whole JSON number as `i32`, saturating at the bounds.
fn whole<E: serde::de::Error>(n: &serde_json::Number, axis: &str) -> Result<i32, E> {
    if let Some(v) = n.as_i64() {
        return Ok(i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX }));
    }
    if n.is_u64() {
        return Ok(i32::MAX);
    }
    match n.as_f64() {
        // `as` saturates for finite floats.
        Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i32),
        _ => Err(E::custom(format!("{axis} must be a whole number, got {n}"))),
    }
}

/// Why a reply could not be used.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReplyError {
    /// No text at all.
    #[display("Empty response")]
    Empty,

    /// Text that is not the expected structured payload.
    #[display("Malformed response ({}): {}", reason, reply)]
    Malformed {
        /// The raw reply as received.
        reply: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl std::error::Error for ReplyError {}

/// Removes a surrounding Markdown code fence, with or without a language tag.
///
/// Text without a fence is returned trimmed.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

/// Parses a raw reply into an [`AgentReply`].
///
/// # Errors
///
/// [`ReplyError::Empty`] for blank text, [`ReplyError::Malformed`] for
/// anything that does not deserialize into the expected shape.
#[instrument(skip(reply), fields(reply_length = reply.len()))]
pub fn parse_reply(reply: &str) -> Result<AgentReply, ReplyError> {
    if reply.trim().is_empty() {
        return Err(ReplyError::Empty);
    }

    let body = strip_code_fence(reply);
    let parsed: AgentReply = serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "Reply did not parse");
        ReplyError::Malformed {
            reply: reply.to_string(),
            reason: e.to_string(),
        }
    })?;

    debug!(coordinate = %parsed.coordinate, "Reply parsed");
    Ok(parsed)
}
