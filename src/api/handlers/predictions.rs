use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::engine::{self, Submission};
use crate::errors::AppError;
use crate::services::history::{self, PredictionHistoryEntry};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitPredictionRequest {
    /// `H`, `D` or `A`.
    pub outcome: String,
}

/// PUT /api/players/:id/predictions/:fixture_id — Create or replace a prediction.
pub async fn submit(
    State(state): State<AppState>,
    Path((player_id, fixture_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<SubmitPredictionRequest>,
) -> Result<Json<ApiResponse<Submission>>, AppError> {
    let submission = engine::submit_prediction_code(
        state.store.as_ref(),
        player_id,
        fixture_id,
        &body.outcome,
        Utc::now(),
    )
    .await?;

    Ok(ApiResponse::ok(submission))
}

/// GET /api/players/:id/predictions — Prediction history with points.
pub async fn history(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PredictionHistoryEntry>>>, AppError> {
    let entries = history::prediction_history(state.store.as_ref(), player_id).await?;
    Ok(ApiResponse::ok(entries))
}
