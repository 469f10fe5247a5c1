//! Errors raised when applying moves.

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell at the position is already occupied.
    #[display("Cell {} is already occupied", _0)]
    IllegalMove(usize),

    /// The position is not on the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
