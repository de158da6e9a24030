use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    models::{Notice, SessionView},
    services::session::Session,
};

pub mod favorites;
pub mod keywords;
pub mod recommendations;
pub mod search;
pub mod stats;
pub mod strategy;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}

/// Answer to a UI action: an optional notice plus the resulting session view
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub notice: Option<Notice>,
    pub session: SessionView,
}

impl ActionResponse {
    pub async fn from_session(session: &Session, notice: Option<Notice>) -> Json<Self> {
        Json(Self {
            notice,
            session: session.view().await,
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session_view))
        .route("/search/input", post(search::input))
        .route("/search/suggestions", get(search::suggestions))
        .route("/favorites", post(favorites::add).delete(favorites::clear))
        .route("/favorites/:name", delete(favorites::remove))
        .route("/keywords/:word/toggle", post(keywords::toggle))
        .route("/keywords/select-all", post(keywords::select_all))
        .route("/keywords/selection", delete(keywords::clear_selection))
        .route("/strategy", put(strategy::set_strategy))
        .route("/relations", put(strategy::set_relations))
        .route("/relations/:relation/toggle", post(strategy::toggle_relation))
        .route("/recommendations", post(recommendations::recommend))
        .route("/stats", get(stats::stats))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Full view of the current session
async fn session_view(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}

/// Tracing span for one HTTP request, tagged with a fresh request ID
fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %Uuid::new_v4(),
    )
}
