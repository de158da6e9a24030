use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    models::{Relation, Strategy},
    routes::{ActionResponse, AppState},
};

#[derive(Debug, Deserialize)]
pub struct StrategyRequest {
    pub strategy: Strategy,
}

#[derive(Debug, Deserialize)]
pub struct RelationsRequest {
    pub relations: Vec<Relation>,
}

pub async fn set_strategy(
    State(state): State<AppState>,
    Json(request): Json<StrategyRequest>,
) -> Json<ActionResponse> {
    state.session.set_strategy(request.strategy).await;
    ActionResponse::from_session(&state.session, None).await
}

pub async fn set_relations(
    State(state): State<AppState>,
    Json(request): Json<RelationsRequest>,
) -> Json<ActionResponse> {
    state.session.set_relations(request.relations).await;
    ActionResponse::from_session(&state.session, None).await
}

pub async fn toggle_relation(
    State(state): State<AppState>,
    Path(relation): Path<Relation>,
) -> Json<ActionResponse> {
    state.session.toggle_relation(relation).await;
    ActionResponse::from_session(&state.session, None).await
}
