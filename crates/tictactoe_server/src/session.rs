//! Game session management.
//!
//! Each game id owns its own board behind its own lock. The map lock is
//! only held long enough to find or insert an entry, so a search in one
//! game never blocks requests for another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tictactoe_engine::{Board, MoveError, MoveReply, Outcome, apply_player_move_and_reply};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game.
pub type GameId = String;

/// Error raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No board exists for this game id.
    #[display("Game {game_id} has not been initialized")]
    NotInitialized {
        /// Requested game id.
        game_id: GameId,
    },

    /// A game with this id is already running.
    #[display("Game {game_id} already exists")]
    AlreadyExists {
        /// Requested game id.
        game_id: GameId,
    },

    /// The move itself was rejected.
    #[display("Invalid move: {}", _0)]
    Move(MoveError),

    /// A thread panicked while holding session state.
    #[display("Session state lock poisoned")]
    LockPoisoned,
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, SessionError> {
    mutex.lock().map_err(|_| SessionError::LockPoisoned)
}

/// One human-versus-engine game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Game id.
    pub id: GameId,
    /// Current board.
    pub board: Board,
}

impl GameSession {
    /// Creates a session with an empty board.
    #[instrument]
    pub fn new(id: GameId) -> Self {
        info!(game_id = %id, "Creating new game session");
        Self {
            id,
            board: tictactoe_engine::create_game(),
        }
    }

    /// Current state of the board.
    pub fn outcome(&self) -> Outcome {
        self.board.evaluate()
    }

    /// Plays the human move and the engine's reply.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn make_move(&mut self, position: usize) -> Result<MoveReply, SessionError> {
        let reply = apply_player_move_and_reply(&mut self.board, position)?;
        info!(
            position,
            reply = ?reply.reply,
            status = reply.outcome.status(),
            "Move completed successfully"
        );
        Ok(reply)
    }
}

/// Game map plus the counter behind generated ids.
#[derive(Debug, Default)]
struct Registry {
    games: HashMap<GameId, Arc<Mutex<GameSession>>>,
    next_id: u64,
}

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    registry: Arc<Mutex<Registry>>,
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    /// Starts a new game and returns a snapshot of it.
    ///
    /// Without an explicit id one of the form `game-<n>` is generated.
    #[instrument(skip(self))]
    pub fn create_game(&self, id: Option<GameId>) -> Result<GameSession, SessionError> {
        let mut registry = lock(&self.registry)?;

        let id = match id {
            Some(id) if registry.games.contains_key(&id) => {
                warn!(game_id = %id, "Game already exists");
                return Err(SessionError::AlreadyExists { game_id: id });
            }
            Some(id) => id,
            None => loop {
                registry.next_id += 1;
                let candidate = format!("game-{}", registry.next_id);
                if !registry.games.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        let session = GameSession::new(id.clone());
        let snapshot = session.clone();
        registry.games.insert(id.clone(), Arc::new(Mutex::new(session)));

        info!(game_id = %id, count = registry.games.len(), "Created new game");
        Ok(snapshot)
    }

    fn entry(&self, id: &str) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let registry = lock(&self.registry)?;
        registry.games.get(id).cloned().ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            SessionError::NotInitialized {
                game_id: id.to_string(),
            }
        })
    }

    /// Returns a snapshot of a game.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<GameSession, SessionError> {
        let entry = self.entry(id)?;
        let session = lock(&entry)?;
        Ok(session.clone())
    }

    /// Plays a human move in the given game and returns the reply with the
    /// resulting board.
    #[instrument(skip(self))]
    pub fn make_move(&self, id: &str, position: usize) -> Result<(MoveReply, Board), SessionError> {
        let entry = self.entry(id).inspect_err(|_| {
            warn!(game_id = id, position, "Move for unknown game");
        })?;
        let mut session = lock(&entry)?;
        let reply = session.make_move(position)?;
        Ok((reply, session.board))
    }

    /// Ends a game and drops its board.
    #[instrument(skip(self))]
    pub fn remove_game(&self, id: &str) -> Result<(), SessionError> {
        let mut registry = lock(&self.registry)?;
        match registry.games.remove(id) {
            Some(_) => {
                info!(game_id = id, "Removed game");
                Ok(())
            }
            None => Err(SessionError::NotInitialized {
                game_id: id.to_string(),
            }),
        }
    }

    /// Lists all active game ids, sorted.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameId>, SessionError> {
        let registry = lock(&self.registry)?;
        let mut ids: Vec<_> = registry.games.keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed games");
        Ok(ids)
    }
}
