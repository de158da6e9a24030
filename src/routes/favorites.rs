use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    routes::{ActionResponse, AppState},
};

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Handler for adding a favorite book by name
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddFavoriteRequest>,
) -> AppResult<Json<ActionResponse>> {
    let notice = state.session.add_favorite(&request.name).await?;
    Ok(ActionResponse::from_session(&state.session, Some(notice)).await)
}

/// Handler for removing one favorite book
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<ActionResponse> {
    let notice = state.session.remove_favorite(&name).await;
    ActionResponse::from_session(&state.session, notice).await
}

/// Handler for clearing every favorite; needs `?confirm=true`
pub async fn clear(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> AppResult<Json<ActionResponse>> {
    let notice = state.session.clear_favorites(params.confirm).await?;
    Ok(ActionResponse::from_session(&state.session, notice).await)
}
