use axum::{extract::State, Json};

use crate::{error::AppResult, models::StatsView, routes::AppState};

/// Handler for catalogue statistics
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsView>> {
    let stats = state.session.stats().await?;
    Ok(Json(stats))
}
