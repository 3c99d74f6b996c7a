//! Colorized terminal rendering.

use crate::orchestrator::{GameObserver, GameOutcome};
use crossterm::style::{StyledContent, Stylize};
use gomoku_board::{Board, Cell, Coordinate, EMPTY_GLYPH, Piece, hex_digit};

/// Renders the board with colored pieces and `highlight`ed cells.
///
/// Same layout as [`Board::render`]: base-16 labels, cells separated by
/// single spaces. X is red, O is blue, empty cells are grey.
pub fn render_colored(board: &Board, highlight: &[Coordinate]) -> String {
    let header: Vec<String> = (0..board.size()).map(|i| hex_digit(i).to_string()).collect();
    let mut lines = vec![format!("  {}", header.join(" ").dark_grey())];

    let size = board.size() as i32;
    for y in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|x| {
                let c = Coordinate::new(x, y);
                let styled = styled_cell(board.get(c).unwrap_or_default());
                if highlight.contains(&c) {
                    styled.on_yellow().to_string()
                } else {
                    styled.to_string()
                }
            })
            .collect();
        lines.push(format!("{} {}", hex_digit(y as usize).dark_grey(), cells.join(" ")));
    }

    lines.join("\n")
}

fn styled_cell(cell: Cell) -> StyledContent<String> {
    match cell {
        Cell::Empty => EMPTY_GLYPH.to_string().dark_grey(),
        Cell::Occupied(Piece::X) => "X".to_string().red().bold(),
        Cell::Occupied(Piece::O) => "O".to_string().blue().bold(),
    }
}

/// Prints game progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Creates a new console observer.
    pub fn new() -> Self {
        Self
    }
}

impl GameObserver for ConsoleObserver {
    fn on_game_start(&mut self, board: &Board) {
        println!("{}", "Five in a row. Good luck!".yellow());
        println!("\n{}\n", render_colored(board, &[]));
    }

    fn on_turn_start(&mut self, name: &str, piece: Piece) {
        println!("{}", format!("{name} ({piece}) to move...").cyan());
    }

    fn on_move(&mut self, name: &str, piece: Piece, coordinate: Coordinate, board: &Board) {
        println!(
            "{name} ({piece}) played row {} column {}",
            hex_digit(coordinate.y as usize),
            hex_digit(coordinate.x as usize)
        );
        println!("\n{}\n", render_colored(board, &[coordinate]));
    }

    fn on_game_end(&mut self, outcome: &GameOutcome, board: &Board) {
        if let GameOutcome::Winner { coordinate, .. } = outcome {
            let line = board.winning_line(*coordinate).unwrap_or_default();
            println!("\n{}\n", render_colored(board, &line));
        }
        println!("{}", outcome.to_string().green().bold());
    }
}
