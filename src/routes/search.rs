use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{models::SuggestionState, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

/// Handler for every keystroke in the book input
///
/// Accepted immediately; suggestions appear once the debounced search settles.
pub async fn input(State(state): State<AppState>, Json(request): Json<InputRequest>) -> StatusCode {
    state.session.on_input(&request.text);
    StatusCode::ACCEPTED
}

/// Handler for the current suggestion list
pub async fn suggestions(State(state): State<AppState>) -> Json<SuggestionState> {
    Json(state.session.suggestions())
}
