//! Tests for the human-versus-engine turn.

use tictactoe_engine::{
    Board, Cell, MoveError, Outcome, Player, apply_player_move_and_reply, create_game,
};

const X: Cell = Cell::PlayerOne;
const O: Cell = Cell::PlayerTwo;
const E: Cell = Cell::Empty;

#[test]
fn test_create_game_is_empty() {
    let board = create_game();
    assert_eq!(board.empty_count(), 9);
    assert_eq!(board.evaluate(), Outcome::InProgress);
}

#[test]
fn test_reply_is_applied() {
    let mut board = create_game();
    let reply = apply_player_move_and_reply(&mut board, 4).unwrap();

    let position = reply.reply.unwrap();
    assert_ne!(position, 4);
    assert_eq!(board.get(4), Some(Cell::PlayerOne));
    assert_eq!(board.get(position), Some(Cell::PlayerTwo));
    assert_eq!(board.empty_count(), 7);
    assert_eq!(reply.game_state(), -1.0);
}

#[test]
fn test_occupied_cell_leaves_board_unchanged() {
    let mut board = create_game();
    let reply = apply_player_move_and_reply(&mut board, 0).unwrap();
    let taken = reply.reply.unwrap();
    let before = board;

    for pos in [0, taken] {
        assert_eq!(
            apply_player_move_and_reply(&mut board, pos),
            Err(MoveError::IllegalMove(pos))
        );
        assert_eq!(board, before);
        assert_eq!(board.empty_count(), 7);
    }
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut board = create_game();
    assert_eq!(
        apply_player_move_and_reply(&mut board, 9),
        Err(MoveError::OutOfBounds(9))
    );
    assert_eq!(board, Board::new());
}

#[test]
fn test_winning_move_gets_no_reply() {
    let mut board = Board::from_cells([X, X, E, O, O, E, E, E, E]);
    let reply = apply_player_move_and_reply(&mut board, 2).unwrap();
    assert_eq!(reply.reply, None);
    assert!(matches!(reply.outcome, Outcome::PlayerOneWins(_)));
    assert!(reply.game_state() >= 10.0);
    assert_eq!(board.empty_count(), 4);
}

#[test]
fn test_filling_last_cell_gets_no_reply() {
    let mut board = Board::from_cells([X, O, X, X, O, O, O, X, E]);
    let reply = apply_player_move_and_reply(&mut board, 8).unwrap();
    assert_eq!(reply.reply, None);
    assert_eq!(reply.outcome, Outcome::Draw);
    assert_eq!(reply.game_state(), 0.0);
}

#[test]
fn test_engine_takes_its_win() {
    // X . .
    // O O .
    // X . .
    let mut board = Board::from_cells([X, E, E, O, O, E, X, E, E]);
    let reply = apply_player_move_and_reply(&mut board, 8).unwrap();
    assert_eq!(reply.reply, Some(5));
    assert_eq!(reply.outcome.winner(), Some(Player::Two));
    assert!(reply.game_state() <= -10.0);
}

#[test]
fn test_finished_game_rejects_moves() {
    let mut board = Board::from_cells([O, O, O, X, X, E, X, E, E]);
    let before = board;
    assert_eq!(
        apply_player_move_and_reply(&mut board, 5),
        Err(MoveError::GameOver)
    );
    assert_eq!(board, before);
}

/// Plays every possible human line against the engine.
fn assert_engine_never_loses(board: Board) {
    for pos in board.legal_moves() {
        let mut next = board;
        let reply = apply_player_move_and_reply(&mut next, pos).unwrap();
        assert_ne!(
            reply.outcome.winner(),
            Some(Player::One),
            "engine lost after human played {pos} on\n{board}"
        );
        if !reply.outcome.is_terminal() {
            assert_engine_never_loses(next);
        }
    }
}

#[test]
fn test_engine_never_loses_as_second_player() {
    assert_engine_never_loses(create_game());
}

#[test]
fn test_reply_serializes_game_state_fields() {
    let mut board = Board::from_cells([X, X, E, O, O, E, E, E, E]);
    let reply = apply_player_move_and_reply(&mut board, 2).unwrap();
    let json = serde_json::to_value(reply).unwrap();
    assert_eq!(json["reply"], serde_json::Value::Null);
    assert!(json["outcome"]["PlayerOneWins"].as_f64().unwrap() >= 10.0);
}
