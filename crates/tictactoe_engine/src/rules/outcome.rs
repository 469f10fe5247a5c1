//! Terminal-state detection.

use super::lines::{WIN, tally};
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};

/// Numeric evaluation of a board position.
///
/// `>= 10` is a player one win, `<= -10` a player two win and `0` a draw.
pub type Score = f64;

/// Wire score for a game that is still being played.
pub const IN_PROGRESS_SCORE: Score = -1.0;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player one completed a line. Carries the aggregate score (`>= 10`).
    PlayerOneWins(Score),
    /// Player two completed a line. Carries the aggregate score (`<= -10`).
    PlayerTwoWins(Score),
    /// Board full with no completed line.
    Draw,
    /// Moves remain and nobody has won.
    InProgress,
}

impl Outcome {
    /// Whether the game has concluded.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWins(_) => Some(Player::One),
            Outcome::PlayerTwoWins(_) => Some(Player::Two),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// Single-number encoding: the win score, `0` for a draw, `-1` to continue.
    pub fn wire_score(&self) -> Score {
        match *self {
            Outcome::PlayerOneWins(score) | Outcome::PlayerTwoWins(score) => score,
            Outcome::Draw => 0.0,
            Outcome::InProgress => IN_PROGRESS_SCORE,
        }
    }

    /// Short machine-readable label.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::PlayerOneWins(_) => "player_one_won",
            Outcome::PlayerTwoWins(_) => "player_two_won",
            Outcome::Draw => "draw",
            Outcome::InProgress => "in_progress",
        }
    }
}

/// Checks whether either player has won, or the board is drawn.
///
/// Player one's total is consulted first, then player two's, then the
/// empty-cell count.
pub fn evaluate(board: &Board) -> Outcome {
    let tally = tally(board);

    if tally.player_one >= WIN {
        Outcome::PlayerOneWins(tally.player_one)
    } else if tally.player_two <= -WIN {
        Outcome::PlayerTwoWins(tally.player_two)
    } else if board.empty_count() == 0 {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const X: Cell = Cell::PlayerOne;
    const O: Cell = Cell::PlayerTwo;
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
        assert_eq!(Outcome::InProgress.wire_score(), -1.0);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X
        // X O O
        // O X X
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        let outcome = evaluate(&board);
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(outcome.wire_score(), 0.0);
    }

    #[test]
    fn test_player_one_line_wins() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Player::One));
        assert!(outcome.wire_score() >= 10.0);
    }

    #[test]
    fn test_player_two_line_wins() {
        let board = Board::from_cells([X, X, O, X, O, E, O, E, E]);
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Player::Two));
        assert!(outcome.wire_score() <= -10.0);
    }

    #[test]
    fn test_win_on_last_cell_beats_draw() {
        // X O X
        // O X O
        // O X X
        let board = Board::from_cells([X, O, X, O, X, O, O, X, X]);
        assert!(matches!(evaluate(&board), Outcome::PlayerOneWins(_)));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Outcome::Draw.status(), "draw");
        assert_eq!(Outcome::PlayerTwoWins(-10.0).status(), "player_two_won");
        assert!(Outcome::Draw.is_terminal());
        assert!(!Outcome::InProgress.is_terminal());
    }
}
