//! Core domain types for tic-tac-toe.

use crate::error::MoveError;
use crate::rules::{self, Outcome};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// Moves first; the maximizing side.
    #[strum(serialize = "Player One")]
    One,
    /// Moves second; the minimizing side.
    #[strum(serialize = "Player Two")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the cell value this player writes.
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// Mark shown when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    Empty,
    /// Occupied by player one.
    PlayerOne,
    /// Occupied by player two.
    PlayerTwo,
}

impl Cell {
    /// Returns the owner of the cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order: index / 3 is the row and index % 3
/// the column. `empty_count` always equals the number of [`Cell::Empty`]
/// entries and is kept in step by [`Board::apply_move`]. The serialized
/// form is the bare cell array, so the count is rebuilt on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Cell; CELL_COUNT]", into = "[Cell; CELL_COUNT]")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    empty_count: u8,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            empty_count: CELL_COUNT as u8,
        }
    }

    /// Builds a board from an existing cell layout.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        let empty_count = cells.iter().filter(|&&c| c == Cell::Empty).count() as u8;
        Self { cells, empty_count }
    }

    /// Gets the cell at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of cells still empty.
    pub fn empty_count(&self) -> usize {
        self.empty_count as usize
    }

    /// Places `player`'s mark at `pos`.
    ///
    /// Rejected moves leave the board untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, pos: usize, player: Player) -> Result<(), MoveError> {
        match self.cells.get(pos) {
            None => Err(MoveError::OutOfBounds(pos)),
            Some(Cell::Empty) => {
                self.cells[pos] = player.cell();
                self.empty_count -= 1;
                Ok(())
            }
            Some(_) => Err(MoveError::IllegalMove(pos)),
        }
    }

    /// Places a mark without validation (use [`Board::apply_move`] for checked moves).
    pub(crate) fn place(&mut self, pos: usize, player: Player) {
        debug_assert!(self.is_empty(pos), "place() on occupied cell {pos}");
        self.cells[pos] = player.cell();
        self.empty_count -= 1;
    }

    /// Empty positions in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Scores the board; see [`rules::evaluate`].
    pub fn evaluate(&self) -> Outcome {
        rules::evaluate(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their index so a player can type it back.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos].owner() {
                    None => char::from(b'0' + pos as u8),
                    Some(player) => player.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Cell; CELL_COUNT]> for Board {
    fn from(cells: [Cell; CELL_COUNT]) -> Self {
        Self::from_cells(cells)
    }
}

impl From<Board> for [Cell; CELL_COUNT] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
