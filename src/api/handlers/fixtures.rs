use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::errors::AppError;
use crate::models::{Fixture, FixtureTiming};
use crate::services::schedule;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FixtureListQuery {
    pub status: Option<FixtureTiming>,
}

/// GET /api/fixtures?status=upcoming|past
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FixtureListQuery>,
) -> Result<Json<ApiResponse<Vec<Fixture>>>, AppError> {
    let fixtures = schedule::list_fixtures(state.store.as_ref(), query.status, Utc::now()).await?;
    Ok(ApiResponse::ok(fixtures))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Fixture>>, AppError> {
    let fixture = schedule::get_fixture(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok(fixture))
}
