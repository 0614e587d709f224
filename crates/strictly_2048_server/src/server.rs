//! HTTP REST API for 2048 games.

use crate::config::ServerConfig;
use crate::service::{GameService, GameServiceError};
use crate::session::{GameId, GameSession};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strictly_2048::{Direction, Grid};
use tower::ServiceBuilder;
use tracing::{error, info, instrument, warn};

/// Game state returned by start and fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Game id.
    pub id: GameId,
    /// Current grid.
    pub board: Grid,
    /// Cumulative score.
    pub score: u32,
    /// Whether the game has been lost.
    pub game_over: bool,
    /// Whether a 2048 tile has been reached.
    pub game_clear: bool,
}

impl From<&GameSession> for GameView {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id,
            board: *session.game.grid(),
            score: session.game.score(),
            game_over: session.game.is_over(),
            game_clear: session.game.is_won(),
        }
    }
}

/// Request body for submitting a move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Direction to slide.
    pub direction: Direction,
}

/// Result of a submitted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// Grid after the move.
    pub board: Grid,
    /// Cumulative score after the move.
    pub score: u32,
    /// Score gained by this move.
    pub earned_score: u32,
    /// Whether the move changed the grid.
    pub moved: bool,
    /// Whether the game has been lost.
    pub game_over: bool,
    /// Whether a 2048 tile has been reached.
    pub game_clear: bool,
}

/// Error returned to HTTP callers as `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// HTTP status of the error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GameServiceError> for ApiError {
    fn from(err: GameServiceError) -> Self {
        match &err {
            GameServiceError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            GameServiceError::Store(_) => {
                error!(error = %err, "Store failure");
                Self::internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Runs blocking store work off the async executor.
async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, GameServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::internal(format!("Worker task failed: {}", e)))?
        .map_err(ApiError::from)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(
        method = %req.method(),
        uri = %req.uri(),
        "Incoming HTTP request"
    );
    req
}

/// Builds the API router:
///
/// - `POST /game/start`
/// - `GET /game/{id}`
/// - `POST /game/{id}/move` with `{"direction": "LEFT"}`
/// - `GET /game/{id}/board`
pub fn router(service: GameService) -> Router {
    Router::new()
        .route("/game/start", post(start_game))
        .route("/game/{id}", get(get_game))
        .route("/game/{id}/move", post(make_move))
        .route("/game/{id}/board", get(get_board))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(service)
}

#[instrument(skip(service))]
async fn start_game(State(service): State<GameService>) -> Result<Json<GameView>, ApiError> {
    let session = run_blocking(move || {
        let mut rng = StdRng::from_entropy();
        service.start_game(&mut rng)
    })
    .await?;

    info!(game_id = session.id, "Game created");
    Ok(Json(GameView::from(&session)))
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let session = run_blocking(move || service.get_game(id)).await?;
    Ok(Json(GameView::from(&session)))
}

#[instrument(skip(service))]
async fn make_move(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let (session, outcome) = run_blocking(move || {
        let mut rng = StdRng::from_entropy();
        service.make_move(id, request.direction, &mut rng)
    })
    .await?;

    if !outcome.moved {
        warn!(game_id = id, direction = %request.direction, "Move did not change the grid");
    }

    Ok(Json(MoveResponse {
        board: *session.game.grid(),
        score: session.game.score(),
        earned_score: outcome.score_delta,
        moved: outcome.moved,
        game_over: session.game.is_over(),
        game_clear: session.game.is_won(),
    }))
}

#[instrument(skip(service))]
async fn get_board(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
) -> Result<Json<Grid>, ApiError> {
    let grid = run_blocking(move || service.get_board(id)).await?;
    Ok(Json(grid))
}

/// Binds the configured address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be bound or serving fails.
#[instrument(skip(config, service), fields(address = %config.bind_address()))]
pub async fn serve(config: &ServerConfig, service: GameService) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server ready at http://{}/", config.bind_address());
    info!("Routes: POST /game/start, GET /game/{{id}}, POST /game/{{id}}/move, GET /game/{{id}}/board");

    axum::serve(listener, router(service)).await
}
