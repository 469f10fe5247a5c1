//! Tic-tac-toe engine: board model, line scoring and exhaustive minimax.
//!
//! # Architecture
//!
//! - **Board**: nine cells plus a running empty-cell count
//! - **Rules**: per-line scoring and terminal detection ([`Outcome`])
//! - **Search**: minimax over the full game tree ([`Minimax`])
//! - **Game**: one human move followed by the engine's reply
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{apply_player_move_and_reply, create_game, Outcome};
//!
//! let mut board = create_game();
//! let reply = apply_player_move_and_reply(&mut board, 4).unwrap();
//! assert!(reply.reply.is_some());
//! assert_eq!(reply.outcome, Outcome::InProgress);
//! assert_eq!(reply.game_state(), -1.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
pub mod rules;
mod search;
mod types;

pub use error::MoveError;
pub use game::{MoveReply, apply_player_move_and_reply, create_game};
pub use rules::{LineTally, Outcome, Score};
pub use search::{Minimax, SearchResult};
pub use types::{Board, CELL_COUNT, Cell, Player};
