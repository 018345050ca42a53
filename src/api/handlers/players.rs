use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::engine::{self, EngineError};
use crate::errors::AppError;
use crate::models::{Player, PlayerProfile};
use crate::services::standings::{self, PlayerStats};
use crate::AppState;

#[derive(Serialize)]
pub struct PlayerDetail {
    pub player: Player,
    pub stats: PlayerStats,
}

/// POST /api/players — Register a player profile.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<PlayerProfile>,
) -> Result<(StatusCode, Json<ApiResponse<Player>>), AppError> {
    let player = engine::register_player(state.store.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(player)))
}

/// GET /api/players/:id — Profile with points summary.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PlayerDetail>>, AppError> {
    let store = state.store.as_ref();
    let player = store
        .get_player(id)
        .await
        .map_err(EngineError::from)?
        .ok_or_else(|| AppError::NotFound(format!("player {id} not found")))?;
    let stats = standings::player_stats(store, id).await?;

    Ok(ApiResponse::ok(PlayerDetail { player, stats }))
}

/// PUT /api/players/:id — Edit profile fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PlayerProfile>,
) -> Result<Json<ApiResponse<Player>>, AppError> {
    let player = engine::update_profile(state.store.as_ref(), id, &body).await?;
    Ok(ApiResponse::ok(player))
}
