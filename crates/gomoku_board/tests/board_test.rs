//! End-to-end board scenarios on the standard 15x15 board.

use gomoku_board::{Board, Cell, Coordinate, Piece};

/// Piece for a full-board pattern that never lines up five in a row.
///
/// Columns pair up (`x / 2`) and rows alternate, so every axis changes piece
/// at least every second cell.
fn drawn_piece(c: Coordinate) -> Piece {
    if (c.x / 2 + c.y) % 2 == 0 {
        Piece::X
    } else {
        Piece::O
    }
}

#[test]
fn test_five_in_a_row_wins_on_row_seven() {
    let mut board = Board::new(15).unwrap();
    let moves: Vec<_> = (7..=11).map(|x| Coordinate::new(x, 7)).collect();

    for c in &moves {
        board.validate_coordinate(*c).expect("in bounds and empty");
        board.place(*c, Piece::X).unwrap();
    }

    assert!(board.check_win(Coordinate::new(11, 7)));
    assert_eq!(board.get(Coordinate::new(11, 7)), Some(Cell::Occupied(Piece::X)));
}

#[test]
fn test_four_in_a_row_does_not_win() {
    let mut board = Board::new(15).unwrap();
    for x in 7..=10 {
        let c = Coordinate::new(x, 7);
        board.validate_coordinate(c).expect("in bounds and empty");
        board.place(c, Piece::X).unwrap();
    }

    assert!(!board.check_win(Coordinate::new(10, 7)));
    assert!(!board.check_win(Coordinate::new(7, 7)));
}

#[test]
fn test_full_board_without_five_is_a_draw() {
    let mut board = Board::new(15).unwrap();
    let coords: Vec<_> = board.coordinates().collect();

    for c in coords {
        assert!(!board.is_full());
        board.validate_coordinate(c).unwrap();
        board.place(c, drawn_piece(c)).unwrap();
        assert!(!board.check_win(c), "unexpected win at {c}");
    }

    assert!(board.is_full());
    assert_eq!(board.empty_count(), 0);
    assert_eq!(board.occupied_count(), 225);
}

#[test]
fn test_drawn_pattern_splits_pieces_for_alternating_play() {
    let board = Board::new(15).unwrap();
    let x_count = board.coordinates().filter(|c| drawn_piece(*c) == Piece::X).count();
    assert_eq!(x_count, 113);
    assert_eq!(225 - x_count, 112);
}

#[test]
fn test_board_serializes_with_cells() {
    let mut board = Board::new(3).unwrap();
    board.place(Coordinate::new(1, 2), Piece::O).unwrap();

    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(json["size"], 3);
    assert_eq!(json["last_move"], serde_json::json!({"x": 1, "y": 2}));

    let back: Board = serde_json::from_value(json).unwrap();
    assert_eq!(back, board);
}
