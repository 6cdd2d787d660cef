//! Router, shared state and handlers.
//!
//! Routes:
//! - `GET  /`                  layout editing page
//! - `POST /assign`            draw a seat assignment
//! - `POST /save`              persist a layout snapshot
//! - `GET  /saved`             every snapshot, newest first
//! - `GET  /vote`              voting page over the most recent snapshots
//! - `GET  /static/script.js`  page script
//! - `GET  /static/style.css`  page styles

use crate::views::{IndexPage, VotePage};
use askama::Template;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{error, warn};
use seatdraw_core::{
    assign::assign,
    config::ServerConfig,
    error::{SeatError, SeatResult},
    request::{AssignRequest, AssignResponse},
    rng::RngBank,
    snapshot::SnapshotStore,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

const SCRIPT_JS: &str = include_str!("../static/script.js");
const STYLE_CSS: &str = include_str!("../static/style.css");

/// Shared application state passed to handlers.
pub struct AppState {
    pub store:      SnapshotStore,
    pub rng:        RngBank,
    pub vote_limit: usize,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> SeatResult<Self> {
        Ok(Self {
            store:      SnapshotStore::open(&config.save_dir)?,
            rng:        RngBank::from_seed_option(config.seed),
            vote_limit: config.vote_limit,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/assign", post(assign_handler))
        .route("/save", post(save_handler))
        .route("/saved", get(saved_handler))
        .route("/vote", get(vote_handler))
        .route("/static/script.js", get(script_handler))
        .route("/static/style.css", get(style_handler))
        .with_state(state)
}

// ── Errors ──────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Seat(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("Rejected request: {self}");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Run a snapshot store operation on the blocking thread pool.
async fn with_store<T, F>(state: Arc<AppState>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SnapshotStore) -> SeatResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(&state.store)).await?;
    Ok(result?)
}

// ── Pages ───────────────────────────────────────────────────

async fn index_handler() -> Result<Html<String>, ApiError> {
    Ok(Html(IndexPage.render()?))
}

async fn vote_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let limit = state.vote_limit;
    let documents = with_store(state, move |store| store.list_recent(limit)).await?;
    Ok(Html(VotePage::from_documents(&documents).render()?))
}

async fn script_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript; charset=utf-8")], SCRIPT_JS)
}

async fn style_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

// ── JSON API ────────────────────────────────────────────────

async fn assign_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<AssignResponse>, ApiError> {
    let request = AssignRequest::from_json(&body)?;
    let mut rng = state.rng.next_draw();
    let assigned = assign(&request.roster, &request.positions, &mut rng);
    Ok(Json(AssignResponse::success(assigned)))
}

#[derive(Serialize)]
struct SaveResponse {
    status:   &'static str,
    filename: String,
}

async fn save_handler(
    State(state): State<Arc<AppState>>,
    Json(document): Json<Value>,
) -> Result<Json<SaveResponse>, ApiError> {
    let saved = with_store(state, move |store| store.save(&document)).await?;
    Ok(Json(SaveResponse {
        status:   "saved",
        filename: saved.path.display().to_string(),
    }))
}

async fn saved_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(with_store(state, |store| store.list_all()).await?))
}
