//! Human-versus-engine turn handling.
//!
//! The human always plays [`Player::One`]; the engine answers as
//! [`Player::Two`].

use crate::error::MoveError;
use crate::rules::{Outcome, Score};
use crate::search::Minimax;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Result of one human move plus the engine's answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveReply {
    /// Cell the engine played, or `None` if the human's move ended the game.
    pub reply: Option<usize>,
    /// State of the board after both moves.
    pub outcome: Outcome,
}

impl MoveReply {
    /// Wire encoding of [`MoveReply::outcome`].
    pub fn game_state(&self) -> Score {
        self.outcome.wire_score()
    }
}

/// Creates a fresh board for a new game.
#[instrument]
pub fn create_game() -> Board {
    info!("Creating new game board");
    Board::new()
}

/// Plays the human move at `position`, then lets the engine reply.
///
/// On error the board is left exactly as it was.
#[instrument(skip(board), fields(empty = board.empty_count()))]
pub fn apply_player_move_and_reply(
    board: &mut Board,
    position: usize,
) -> Result<MoveReply, MoveError> {
    if board.evaluate().is_terminal() {
        warn!(position, "Move attempted on finished game");
        return Err(MoveError::GameOver);
    }

    board.apply_move(position, Player::One).inspect_err(|e| {
        warn!(position, error = %e, "Rejected player move");
    })?;

    let outcome = board.evaluate();
    if outcome.is_terminal() {
        info!(position, ?outcome, "Player move ended the game");
        return Ok(MoveReply {
            reply: None,
            outcome,
        });
    }

    let reply = Minimax::new()
        .search(board, Player::Two)?
        .map(|result| result.position);
    let outcome = board.evaluate();

    info!(position, ?reply, ?outcome, "Engine replied");
    Ok(MoveReply { reply, outcome })
}
