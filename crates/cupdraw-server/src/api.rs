// JSON API over the tournament service, plus the static draw page.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use cupdraw_app::{Tournament, TournamentError};
use cupdraw_core::model::{NewPlayer, PlayerId};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Build the application router around a shared tournament.
pub fn router(tournament: Arc<Tournament>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/players", get(list_players).post(register_player))
        .route("/players/:id/team", post(choose_team))
        .route("/draws/pick-order", post(draw_pick_order))
        .route("/draws/brackets", post(draw_brackets))
        .with_state(tournament)
}

/// A failed request, rendered as `{"message": ...}` with a status code
/// matching the error kind.
pub enum ApiError {
    Tournament(TournamentError),
    /// The request never reached the service: bad path segment or body.
    Rejected { status: StatusCode, message: String },
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        Self::Tournament(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

fn tournament_status(err: &TournamentError) -> StatusCode {
    match err {
        TournamentError::OddPlayerCount { .. } | TournamentError::InvalidName => {
            StatusCode::BAD_REQUEST
        }
        TournamentError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
        TournamentError::Storage(_) | TournamentError::Sheet(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Tournament(err) if err.is_client_error() => {
                (tournament_status(&err), err.to_string())
            }
            Self::Tournament(err) => {
                error!("request failed: {err:#}");
                (tournament_status(&err), format!("Error: {err:#}"))
            }
            Self::Rejected { status, message } => (status, message),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamRequest {
    pub team: String,
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "cupdraw",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_players(
    State(tournament): State<Arc<Tournament>>,
) -> Result<impl IntoResponse, ApiError> {
    let players = tournament.players()?;
    Ok(Json(json!({ "players": players })))
}

async fn register_player(
    State(tournament): State<Arc<Tournament>>,
    request: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    let player = tournament.register(request)?;
    Ok(Json(json!({
        "message": "Player registered successfully!",
        "player": player
    })))
}

async fn choose_team(
    State(tournament): State<Arc<Tournament>>,
    id: Result<Path<PlayerId>, PathRejection>,
    request: Result<Json<TeamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let player = tournament.choose_team(id, &request.team)?;
    Ok(Json(json!({
        "message": format!("Team {} chosen by {} successfully!", request.team, player.name),
        "player": player
    })))
}

async fn draw_pick_order(
    State(tournament): State<Arc<Tournament>>,
) -> Result<impl IntoResponse, ApiError> {
    let order = tournament.draw_pick_order()?;
    Ok(Json(json!({
        "message": "Pick order drawn successfully!",
        "pick_order": order
    })))
}

async fn draw_brackets(
    State(tournament): State<Arc<Tournament>>,
) -> Result<impl IntoResponse, ApiError> {
    let draw = tournament.draw_brackets()?;
    Ok(Json(json!({
        "message": "Tournament drawn successfully!",
        "draw_id": draw.draw_id,
        "matchups": draw.matchups
    })))
}
