//! Two-character move tokens: row digit then column digit, base 16.

use crate::{Coordinate, InputError};
use tracing::instrument;

/// Returns the upper-case base-16 digit for `value` (`0`..`F`).
///
/// Values past 15 render as `?`; boards that large are rejected at
/// construction.
pub fn hex_digit(value: usize) -> char {
    u32::try_from(value)
        .ok()
        .and_then(|v| char::from_digit(v, 16))
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

/// Parses a local move token such as `7A` (row 7, column 10).
///
/// Input is trimmed and case-insensitive. Tokens that are not exactly two
/// base-16 digits, or whose digits fall outside a `size`-wide board, are
/// rejected here so they never reach the board.
///
/// # Errors
///
/// Returns [`InputError`] describing the first problem found.
#[instrument]
pub fn parse_move_token(token: &str, size: usize) -> Result<Coordinate, InputError> {
    let trimmed = token.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    let [row, col] = chars.as_slice() else {
        return Err(InputError::WrongLength(trimmed.to_string()));
    };

    let y = digit_value(*row, size)?;
    let x = digit_value(*col, size)?;
    Ok(Coordinate::new(x, y))
}

fn digit_value(c: char, size: usize) -> Result<i32, InputError> {
    let value = c.to_digit(16).ok_or(InputError::NotHexDigit(c))?;
    if value as usize >= size {
        return Err(InputError::OutOfRange {
            digit: c.to_ascii_uppercase(),
            last: hex_digit(size.saturating_sub(1)),
        });
    }
    Ok(value as i32)
}
