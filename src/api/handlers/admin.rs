use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::engine::{self, EngineError, FixtureScoring, ScoringReport};
use crate::errors::AppError;
use crate::models::{Fixture, NewFixture, Outcome, Player};
use crate::services::review::{
    self, FixtureScoringView, PlayerQuery, SubmissionQuery, SubmissionRow,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SuspensionRequest {
    pub suspended: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminFlagRequest {
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct OutcomeRequest {
    /// `H`, `D`, `A`, or an explicit null to clear. A missing field is rejected.
    #[serde(deserialize_with = "Option::deserialize")]
    pub outcome: Option<String>,
}

/// GET /api/admin/players?search=
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<ApiResponse<Vec<Player>>>, AppError> {
    let players = review::list_players(state.store.as_ref(), &query).await?;
    Ok(ApiResponse::ok(players))
}

/// PUT /api/admin/players/:id/suspension
pub async fn set_suspension(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SuspensionRequest>,
) -> Result<Json<ApiResponse<Player>>, AppError> {
    let player = engine::set_suspended(state.store.as_ref(), id, body.suspended).await?;
    Ok(ApiResponse::ok(player))
}

/// PUT /api/admin/players/:id/admin
pub async fn set_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminFlagRequest>,
) -> Result<Json<ApiResponse<Player>>, AppError> {
    let player = engine::set_admin(state.store.as_ref(), id, body.is_admin).await?;
    Ok(ApiResponse::ok(player))
}

/// POST /api/admin/fixtures
pub async fn create_fixture(
    State(state): State<AppState>,
    Json(body): Json<NewFixture>,
) -> Result<(StatusCode, Json<ApiResponse<Fixture>>), AppError> {
    let fixture = engine::create_fixture(
        state.store.as_ref(),
        &body,
        state.config.default_kickoff_time,
    )
    .await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(fixture)))
}

/// DELETE /api/admin/fixtures/:id
pub async fn delete_fixture(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    engine::delete_fixture(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/admin/fixtures/:id/outcome — Set or clear the result. Does not score.
pub async fn set_outcome(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<OutcomeRequest>,
) -> Result<Json<ApiResponse<Fixture>>, AppError> {
    let outcome = body
        .outcome
        .as_deref()
        .map(str::parse::<Outcome>)
        .transpose()
        .map_err(EngineError::from)?;

    let fixture = engine::resolve_outcome(state.store.as_ref(), id, outcome).await?;
    Ok(ApiResponse::ok(fixture))
}

/// GET /api/admin/fixtures/:id/scoring — Predictions with correctness and award status.
pub async fn scoring_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FixtureScoringView>>, AppError> {
    let view = review::fixture_scoring_view(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok(view))
}

/// POST /api/admin/fixtures/:id/score
pub async fn score_fixture(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FixtureScoring>>, AppError> {
    let scoring = engine::score_fixture(state.store.as_ref(), id, Utc::now()).await?;
    Ok(ApiResponse::ok(scoring))
}

/// POST /api/admin/scoring/outstanding — Score every fixture with unscored predictions.
pub async fn score_outstanding(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ScoringReport>>, AppError> {
    let report = engine::score_outstanding(
        state.store.as_ref(),
        Utc::now(),
        state.config.scoring_concurrency,
    )
    .await?;
    Ok(ApiResponse::ok(report))
}

/// GET /api/admin/submissions?fixture_id=&search=
pub async fn submissions(
    State(state): State<AppState>,
    Query(query): Query<SubmissionQuery>,
) -> Result<Json<ApiResponse<Vec<SubmissionRow>>>, AppError> {
    let rows = review::list_submissions(state.store.as_ref(), &query).await?;
    Ok(ApiResponse::ok(rows))
}
