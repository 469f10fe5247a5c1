//! Per-line scoring.

use super::Score;
use crate::types::{Board, Cell};

/// Every winning triple: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Value of a completed line.
pub const WIN: Score = 10.0;

/// Bonus for two in a line with the third cell open.
pub const NEAR_WIN: Score = 0.1;

/// Aggregate line scores, one scalar per player.
///
/// `player_one` only grows and `player_two` only shrinks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineTally {
    /// Sum of player one's line contributions.
    pub player_one: Score,
    /// Sum of player two's line contributions.
    pub player_two: Score,
}

#[derive(Default)]
struct LineCounts {
    empty: u8,
    player_one: u8,
    player_two: u8,
}

impl LineTally {
    fn add_line(&mut self, cells: [Cell; 3]) {
        let mut counts = LineCounts::default();
        for cell in cells {
            match cell {
                Cell::Empty => counts.empty += 1,
                Cell::PlayerOne => counts.player_one += 1,
                Cell::PlayerTwo => counts.player_two += 1,
            }
        }

        if counts.empty == 1 {
            if counts.player_one == 2 {
                self.player_one += NEAR_WIN;
            }
            if counts.player_two == 2 {
                self.player_two -= NEAR_WIN;
            }
        } else if counts.player_one == 3 {
            self.player_one += WIN;
        } else if counts.player_two == 3 {
            self.player_two -= WIN;
        }
    }
}

/// Sums the contributions of all eight lines.
pub fn tally(board: &Board) -> LineTally {
    let cells = board.cells();
    let mut tally = LineTally::default();
    for [a, b, c] in LINES {
        tally.add_line([cells[a], cells[b], cells[c]]);
    }
    tally
}
