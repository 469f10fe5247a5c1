//! Game service for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Session**: one owned board per game id
//! - **API**: axum REST routes over the session manager
//! - **Config**: TOML server settings
//! - **Play**: terminal game loop
//!
//! # Example
//!
//! ```
//! use tictactoe_server::SessionManager;
//!
//! # fn example() -> Result<(), tictactoe_server::SessionError> {
//! let sessions = SessionManager::new();
//! let game = sessions.create_game(None)?;
//! let (reply, board) = sessions.make_move(&game.id, 4)?;
//! assert!(reply.reply.is_some());
//! assert_eq!(board.empty_count(), 7);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
pub mod play;
mod session;

pub use api::{
    ApiError, CreateGameRequest, GameView, MoveRequest, MoveResponse, router, serve,
};
pub use config::{ConfigError, ServerConfig};
pub use session::{GameId, GameSession, SessionError, SessionManager};
