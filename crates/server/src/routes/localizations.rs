use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use models::localization::{Localization, LocalizationUpdate};
use service::localizations::{BulkUpdateOutcome, LocalizationService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub localizations: Arc<LocalizationService>,
}

/// Success envelope for mutations: the rows storage reported affected,
/// plus a human-readable confirmation.
#[derive(Serialize)]
pub struct MutationResponse {
    pub data: Vec<Value>,
    pub message: &'static str,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Value>>, ApiError> {
    let rows = state.localizations.list().await?;
    info!(count = rows.len(), "list localizations");
    Ok(Json(rows))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = state.localizations.get(&id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<Localization>,
) -> Result<Json<MutationResponse>, ApiError> {
    let data = state.localizations.create(&input).await?;
    Ok(Json(MutationResponse { data, message: "Localization created successfully" }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<LocalizationUpdate>,
) -> Result<Json<MutationResponse>, ApiError> {
    let data = state.localizations.update(&id, &input).await?;
    Ok(Json(MutationResponse { data, message: "Localization updated successfully" }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let data = state.localizations.delete(&id).await?;
    Ok(Json(MutationResponse { data, message: "Localization deleted successfully" }))
}

/// Batch endpoint: always answers 200 for a well-formed payload; per-entry
/// failures are reported inline, never as a request-level error.
pub async fn bulk_update(
    State(state): State<ServerState>,
    Json(entries): Json<Vec<LocalizationUpdate>>,
) -> Json<BulkUpdateOutcome> {
    Json(state.localizations.bulk_update(&entries).await)
}
