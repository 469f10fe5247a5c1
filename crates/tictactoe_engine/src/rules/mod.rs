//! Scoring rules for tic-tac-toe.
//!
//! Line scoring and terminal detection are pure functions of the board,
//! kept apart from board storage so the search can call them on copies.

pub mod lines;
pub mod outcome;

pub use lines::{LINES, LineTally, tally};
pub use outcome::{IN_PROGRESS_SCORE, Outcome, Score, evaluate};
