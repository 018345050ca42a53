use axum::extract::State;
use axum::Json;

use super::ApiResponse;
use crate::errors::AppError;
use crate::services::standings::{self, LeaderboardEntry};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, AppError> {
    let entries = standings::leaderboard(state.store.as_ref()).await?;
    Ok(ApiResponse::ok(entries))
}
