use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    routes::{ActionResponse, AppState},
};

/// Handler for the recommend action
///
/// Validation failures come back as rejections without any remote call; on success the
/// rendered results are part of the returned session view.
pub async fn recommend(State(state): State<AppState>) -> AppResult<Json<ActionResponse>> {
    tracing::info!("Processing recommendation request");

    let notice = state.session.recommend().await?;
    Ok(ActionResponse::from_session(&state.session, notice).await)
}
