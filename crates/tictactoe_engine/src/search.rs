//! Exhaustive minimax search.
//!
//! Every line of play is explored to the end of the game. Player one
//! maximizes and player two minimizes. Terminal scores are shifted by the
//! ply at which they occur, so a faster win (or a slower loss) ranks higher
//! for the side that owns it.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Minimax, Player};
//!
//! let mut board = Board::new();
//! board.apply_move(4, Player::One).unwrap();
//!
//! let mut engine = Minimax::new();
//! let reply = engine.search(&mut board, Player::Two).unwrap();
//! assert!(reply.is_some());
//! assert_eq!(board.empty_count(), 7);
//! ```

use crate::error::MoveError;
use crate::rules::{Outcome, Score};
use crate::types::{Board, Player};
use tracing::{debug, instrument};

/// Best move found at the root together with search statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Chosen cell index.
    pub position: usize,
    /// Minimax value of the chosen move, depth-adjusted.
    pub score: Score,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Minimax searcher.
///
/// Holds only a node counter; the board is always passed in.
#[derive(Debug, Default)]
pub struct Minimax {
    nodes: u64,
}

impl Minimax {
    /// Creates a new searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the best move for `to_move` without touching `board`.
    ///
    /// Returns `None` when the board is already won or drawn. Among equally
    /// scored moves the lowest index wins.
    #[instrument(skip(self, board), fields(empty = board.empty_count()))]
    pub fn best_move(&mut self, board: &Board, to_move: Player) -> Option<SearchResult> {
        self.nodes = 1;

        let outcome = board.evaluate();
        if outcome.is_terminal() {
            debug!(?outcome, "Board already decided, nothing to search");
            return None;
        }

        let (score, position) = self.expand(board, to_move, 0);
        let position = position?;

        debug!(position, score, nodes = self.nodes, "Search complete");
        Some(SearchResult {
            position,
            score,
            nodes: self.nodes,
        })
    }

    /// Picks the best move for `to_move` and plays it on `board`.
    #[instrument(skip(self, board))]
    pub fn search(
        &mut self,
        board: &mut Board,
        to_move: Player,
    ) -> Result<Option<SearchResult>, MoveError> {
        let Some(result) = self.best_move(board, to_move) else {
            return Ok(None);
        };
        board.apply_move(result.position, to_move)?;
        Ok(Some(result))
    }

    /// Value of `board` with `to_move` to play, `depth` plies below the root.
    fn score(&mut self, board: &Board, to_move: Player, depth: u32) -> Score {
        self.nodes += 1;

        match board.evaluate() {
            Outcome::PlayerOneWins(score) => score - Score::from(depth),
            Outcome::PlayerTwoWins(score) => score + Score::from(depth),
            Outcome::Draw => 0.0,
            Outcome::InProgress => self.expand(board, to_move, depth).0,
        }
    }

    /// Scores every child of a live position and keeps the best.
    ///
    /// Only a strictly better score replaces the incumbent, so ties keep
    /// the earliest (lowest-index) move.
    fn expand(&mut self, board: &Board, to_move: Player, depth: u32) -> (Score, Option<usize>) {
        let mut best_score = match to_move {
            Player::One => Score::NEG_INFINITY,
            Player::Two => Score::INFINITY,
        };
        let mut best_move = None;

        for pos in board.legal_moves() {
            let mut child = *board;
            child.place(pos, to_move);
            let score = self.score(&child, to_move.opponent(), depth + 1);

            let improves = match to_move {
                Player::One => score > best_score,
                Player::Two => score < best_score,
            };
            if improves {
                best_score = score;
                best_move = Some(pos);
            }
        }

        (best_score, best_move)
    }
}
