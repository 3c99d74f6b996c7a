//! Prompt text sent to the remote agent.

use gomoku_board::{Board, BoardError, Coordinate, EMPTY_GLYPH, InvalidReason, Piece};

/// Standing instructions: the agent's role and piece.
pub fn system_prompt(piece: Piece) -> String {
    format!(
        "You are a five-in-a-row (gomoku) expert playing the {piece} pieces. \
         Five or more of your pieces in an unbroken horizontal, vertical or diagonal line wins. \
         On each turn you study the board and choose the strongest empty cell."
    )
}

/// Where the opponent just played.
pub fn last_move_note(coordinate: Coordinate) -> String {
    format!(
        "Your opponent just played at `{{\"x\": {}, \"y\": {}}}`.",
        coordinate.x, coordinate.y
    )
}

/// The per-turn prompt: last move, board, and the required reply format.
pub fn turn_prompt(board: &Board, piece: Piece) -> String {
    let last_move = board
        .last_move()
        .map(|c| format!("{} ", last_move_note(c)))
        .unwrap_or_default();
    let max = board.size().saturating_sub(1);

    format!(
        "{last_move}It is your turn. Current board ({mine} is you, {theirs} is your opponent, \
         {EMPTY_GLYPH} is empty; row and column labels are base-16, so A = 10):\n\
         {board}\n\
         \n\
         Reply strictly with a JSON object of this shape:\n\
         \n\
         {{\n    \"reasoning\": \"your thinking\",\n    \"coordinate\": {{\"x\": <column>, \"y\": <row>}}\n}}\n\
         \n\
         Put your thinking in the reasoning field and the cell you choose (row y, column x) in the \
         coordinate field. x and y are decimal integers from 0 to {max}.\n\
         \n\
         Example: {{\"reasoning\": \"...\", \"coordinate\": {{\"x\": 10, \"y\": 3}}}}",
        mine = piece.glyph(),
        theirs = piece.opponent().glyph(),
        board = board.render(),
    )
}

/// Corrective feedback after a rejected coordinate, followed by the turn
/// prompt again.
pub fn invalid_move_prompt(
    board: &Board,
    piece: Piece,
    coordinate: Coordinate,
    error: &BoardError,
) -> String {
    let max = board.size().saturating_sub(1);
    let why = match error.reason() {
        Some(InvalidReason::Occupied) => "that cell is already occupied".to_string(),
        Some(InvalidReason::OutOfBounds) => format!(
            "that cell is outside the {size}x{size} board (x and y must be between 0 and {max})",
            size = board.size()
        ),
        None => error.to_string(),
    };

    format!(
        "Your move `{{\"x\": {}, \"y\": {}}}` is invalid: {why}. Choose a different empty cell.\n\n{}",
        coordinate.x,
        coordinate.y,
        turn_prompt(board, piece)
    )
}
