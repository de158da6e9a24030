use axum::{
    extract::{Path, State},
    Json,
};

use crate::routes::{ActionResponse, AppState};

/// Handler for flipping selection of one keyword chip
pub async fn toggle(State(state): State<AppState>, Path(word): Path<String>) -> Json<ActionResponse> {
    state.session.toggle_keyword(&word).await;
    ActionResponse::from_session(&state.session, None).await
}

pub async fn select_all(State(state): State<AppState>) -> Json<ActionResponse> {
    let notice = state.session.select_all_keywords().await;
    ActionResponse::from_session(&state.session, Some(notice)).await
}

pub async fn clear_selection(State(state): State<AppState>) -> Json<ActionResponse> {
    let notice = state.session.clear_keyword_selection().await;
    ActionResponse::from_session(&state.session, Some(notice)).await
}
