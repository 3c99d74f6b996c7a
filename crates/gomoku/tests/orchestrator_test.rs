//! Full games through the orchestrator.

mod common;

use common::{Event, RecordingObserver, ScriptedLines, ScriptedPlayer, ScriptedService, fast_retry, reply};
use gomoku::{
    AbortOnExhaustion, AgentPlayer, Board, Coordinate, GameError, GameOutcome, HumanPlayer,
    Orchestrator, Piece, PlayerError,
};

fn drawn_piece(c: Coordinate) -> Piece {
    if (c.x / 2 + c.y) % 2 == 0 {
        Piece::X
    } else {
        Piece::O
    }
}

fn row(y: i32, xs: std::ops::RangeInclusive<i32>) -> Vec<Coordinate> {
    xs.map(|x| Coordinate::new(x, y)).collect()
}

#[tokio::test]
async fn test_first_player_wins_and_events_are_ordered() {
    let x = ScriptedPlayer::new("Xavier", Piece::X, row(7, 7..=11));
    let o = ScriptedPlayer::new("Olga", Piece::O, row(0, 0..=3));
    let mut game = Orchestrator::new(Board::new(15).unwrap(), Box::new(x), Box::new(o)).unwrap();
    let mut observer = RecordingObserver::default();

    let outcome = game.run(&mut observer).await.unwrap();

    assert_eq!(
        outcome,
        GameOutcome::Winner {
            name: "Xavier".to_string(),
            piece: Piece::X,
            coordinate: Coordinate::new(11, 7),
        }
    );
    assert_eq!(outcome.winner(), Some(Piece::X));
    assert_eq!(outcome.to_string(), "Xavier (X) wins!");
    assert_eq!(game.board().occupied_count(), 9);

    let events = &observer.events;
    assert_eq!(events.len(), 1 + 9 * 2 + 1);
    assert_eq!(events[0], Event::Start);
    assert_eq!(events[1], Event::Turn("Xavier".to_string(), Piece::X));
    assert_eq!(events[2], Event::Move(Piece::X, Coordinate::new(7, 7)));
    assert_eq!(events[3], Event::Turn("Olga".to_string(), Piece::O));
    assert_eq!(events[4], Event::Move(Piece::O, Coordinate::new(0, 0)));
    assert_eq!(events.last(), Some(&Event::End(outcome.clone())));
}

#[tokio::test]
async fn test_full_board_is_a_draw() {
    let board = Board::new(15).unwrap();
    let coords: Vec<_> = board.coordinates().collect();
    let xs: Vec<_> = coords.iter().copied().filter(|c| drawn_piece(*c) == Piece::X).collect();
    let os: Vec<_> = coords.iter().copied().filter(|c| drawn_piece(*c) == Piece::O).collect();
    assert_eq!((xs.len(), os.len()), (113, 112));

    let mut game = Orchestrator::new(
        board,
        Box::new(ScriptedPlayer::new("X", Piece::X, xs)),
        Box::new(ScriptedPlayer::new("O", Piece::O, os)),
    )
    .unwrap();
    let mut observer = RecordingObserver::default();

    let outcome = game.run(&mut observer).await.unwrap();

    assert!(outcome.is_draw());
    assert_eq!(outcome.to_string(), "Draw!");
    assert!(game.board().is_full());
    assert_eq!(observer.events.last(), Some(&Event::End(GameOutcome::Draw)));
}

#[tokio::test]
async fn test_player_failure_ends_the_game() {
    let x = ScriptedPlayer::new("X", Piece::X, [Coordinate::new(0, 0)]);
    let o = ScriptedPlayer::new("O", Piece::O, []);
    let mut game = Orchestrator::new(Board::new(15).unwrap(), Box::new(x), Box::new(o)).unwrap();
    let mut observer = RecordingObserver::default();

    let err = game.run(&mut observer).await.unwrap_err();

    assert!(matches!(
        err,
        GameError::Turn { ref player, source: PlayerError::InputClosed } if player == "O"
    ));
    assert!(!observer.events.iter().any(|e| matches!(e, Event::End(_))));
}

#[tokio::test]
async fn test_illegal_move_is_refused() {
    let x = ScriptedPlayer::new("X", Piece::X, [Coordinate::new(3, 3)]);
    let o = ScriptedPlayer::new("O", Piece::O, [Coordinate::new(3, 3)]);
    let mut game = Orchestrator::new(Board::new(15).unwrap(), Box::new(x), Box::new(o)).unwrap();

    let err = game.run(&mut RecordingObserver::default()).await.unwrap_err();

    assert!(matches!(err, GameError::IllegalMove { ref player, .. } if player == "O"));
    assert_eq!(game.board().occupied_count(), 1);
}

#[test]
fn test_players_must_differ_in_piece() {
    let a = ScriptedPlayer::new("A", Piece::O, []);
    let b = ScriptedPlayer::new("B", Piece::O, []);

    let result = Orchestrator::new(Board::new(15).unwrap(), Box::new(a), Box::new(b));

    assert!(matches!(result, Err(GameError::DuplicatePiece(Piece::O))));
}

#[tokio::test]
async fn test_human_beats_self_correcting_agent() {
    let lines = ScriptedLines::new(["77", "78", "79", "7A", "7B"]);
    let human = HumanPlayer::new("You", Piece::X, lines.clone());

    // The agent first tries the human's opening cell.
    let service = ScriptedService::new([reply(7, 7), reply(0, 0), reply(1, 0), reply(2, 0), reply(3, 0)]);
    let agent = AgentPlayer::new(
        "Agent",
        Piece::O,
        service.clone(),
        fast_retry(3),
        Box::new(AbortOnExhaustion),
    );

    let mut game =
        Orchestrator::new(Board::new(15).unwrap(), Box::new(human), Box::new(agent)).unwrap();
    let outcome = game.run(&mut RecordingObserver::default()).await.unwrap();

    assert_eq!(outcome.winner(), Some(Piece::X));
    assert_eq!(service.calls(), 5);
    assert!(lines.notices().is_empty());
    assert_eq!(game.board().winning_line(Coordinate::new(11, 7)), Some(row(7, 7..=11)));
}
