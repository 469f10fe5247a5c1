//! REST API over the session manager.
//!
//! | Method | Path                          | Body              |
//! |--------|-------------------------------|-------------------|
//! | POST   | `/api/games`                  | `{"game_id"?: ..}`|
//! | GET    | `/api/games`                  |                   |
//! | GET    | `/api/games/{game_id}`        |                   |
//! | DELETE | `/api/games/{game_id}`        |                   |
//! | POST   | `/api/games/{game_id}/moves`  | `{"move": 0-8}`   |
//!
//! `game_state` in responses is the numeric outcome: `>= 10` player one
//! won, `<= -10` player two won, `0` draw, `-1` still playing.

use crate::config::ServerConfig;
use crate::session::{GameId, GameSession, SessionError, SessionManager};
use anyhow::Context;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tictactoe_engine::{Board, CELL_COUNT, Cell, MoveError, MoveReply, Score};
use tracing::{debug, error, info, instrument, warn};

/// Request body for creating a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Explicit id; generated when absent.
    #[serde(default)]
    pub game_id: Option<GameId>,
}

/// Request body for a human move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index 0-8.
    #[serde(rename = "move")]
    pub position: usize,
}

/// Board state returned by create and get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// Game id.
    pub game_id: GameId,
    /// Cells in row-major order.
    pub cells: [Cell; CELL_COUNT],
    /// `in_progress`, `player_one_won`, `player_two_won` or `draw`.
    pub status: String,
    /// Numeric outcome.
    pub game_state: Score,
}

impl From<&GameSession> for GameView {
    fn from(session: &GameSession) -> Self {
        let outcome = session.outcome();
        Self {
            game_id: session.id.clone(),
            cells: *session.board.cells(),
            status: outcome.status().to_string(),
            game_state: outcome.wire_score(),
        }
    }
}

/// Result of a human move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Game id.
    pub game_id: GameId,
    /// Engine's reply, `null` if the human's move ended the game.
    #[serde(rename = "move")]
    pub reply: Option<usize>,
    /// Numeric outcome after the reply.
    pub game_state: Score,
    /// Outcome label after the reply.
    pub status: String,
    /// Cells after the reply.
    pub cells: [Cell; CELL_COUNT],
}

impl MoveResponse {
    fn new(game_id: GameId, reply: MoveReply, board: Board) -> Self {
        Self {
            game_id,
            reply: reply.reply,
            game_state: reply.game_state(),
            status: reply.outcome.status().to_string(),
            cells: *board.cells(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by a handler.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// Session layer rejected the request.
    #[display("{}", _0)]
    Session(SessionError),
    /// Body could not be parsed.
    #[display("Bad request: {}", _0)]
    BadRequest(String),
    /// Unexpected failure inside the server.
    #[display("Internal error: {}", _0)]
    Internal(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NotInitialized { .. }) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::Move(MoveError::OutOfBounds(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Session(SessionError::Move(_)) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::LockPoisoned) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, %status, "Request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Builds the API router around a shared session manager.
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/api/games", post(create_game).get(list_games))
        .route("/api/games/{game_id}", get(get_game).delete(delete_game))
        .route("/api/games/{game_id}/moves", post(make_move))
        .layer(middleware::from_fn(log_request))
        .with_state(sessions)
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, "Incoming HTTP request");

    let response = next.run(req).await;
    info!(%method, %uri, status = %response.status(), "Response sent");
    response
}

#[instrument(skip(sessions, body))]
async fn create_game(
    State(sessions): State<SessionManager>,
    body: Bytes,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let req: CreateGameRequest = if body.is_empty() {
        CreateGameRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let session = sessions.create_game(req.game_id)?;
    Ok((StatusCode::CREATED, Json(GameView::from(&session))))
}

#[instrument(skip(sessions))]
async fn list_games(State(sessions): State<SessionManager>) -> Result<Json<Vec<GameId>>, ApiError> {
    Ok(Json(sessions.list_games()?))
}

#[instrument(skip(sessions))]
async fn get_game(
    State(sessions): State<SessionManager>,
    Path(game_id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let session = sessions.get_game(&game_id)?;
    Ok(Json(GameView::from(&session)))
}

#[instrument(skip(sessions))]
async fn delete_game(
    State(sessions): State<SessionManager>,
    Path(game_id): Path<GameId>,
) -> Result<StatusCode, ApiError> {
    sessions.remove_game(&game_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(sessions, body))]
async fn make_move(
    State(sessions): State<SessionManager>,
    Path(game_id): Path<GameId>,
    body: Bytes,
) -> Result<Json<MoveResponse>, ApiError> {
    let req: MoveRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Search is CPU-bound.
    let id = game_id.clone();
    let (reply, board) =
        tokio::task::spawn_blocking(move || sessions.make_move(&id, req.position))
            .await
            .map_err(|e| {
                warn!(error = %e, "Move task failed");
                ApiError::Internal(e.to_string())
            })??;

    Ok(Json(MoveResponse::new(game_id, reply, board)))
}

/// Binds to the configured address and serves the API until shutdown.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig, sessions: SessionManager) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port()))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host(), config.port()))?;

    info!(
        addr = %listener.local_addr()?,
        "Server ready, accepting connections"
    );
    axum::serve(listener, router(sessions))
        .await
        .context("HTTP server exited with an error")?;
    Ok(())
}
