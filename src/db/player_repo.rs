use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::{Player, PlayerProfile};

/// Register a new player. A taken username surfaces as a constraint violation.
pub async fn insert_player(pool: &PgPool, profile: &PlayerProfile) -> StoreResult<Player> {
    let player = sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (username, club_supported, nationality)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&profile.username)
    .bind(&profile.club_supported)
    .bind(&profile.nationality)
    .fetch_one(pool)
    .await?;

    Ok(player)
}

pub async fn get_player(pool: &PgPool, id: Uuid) -> StoreResult<Option<Player>> {
    let player = sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(player)
}

/// Case-insensitive lookup by username.
pub async fn get_player_by_username(pool: &PgPool, username: &str) -> StoreResult<Option<Player>> {
    let player = sqlx::query_as::<_, Player>(
        "SELECT * FROM players WHERE LOWER(username) = LOWER($1)",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(player)
}

/// All players, oldest registration first.
pub async fn list_players(pool: &PgPool) -> StoreResult<Vec<Player>> {
    let players = sqlx::query_as::<_, Player>("SELECT * FROM players ORDER BY joined_at ASC")
        .fetch_all(pool)
        .await?;

    Ok(players)
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    profile: &PlayerProfile,
) -> StoreResult<Player> {
    let player = sqlx::query_as::<_, Player>(
        r#"
        UPDATE players
        SET username = $2, club_supported = $3, nationality = $4
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&profile.username)
    .bind(&profile.club_supported)
    .bind(&profile.nationality)
    .fetch_optional(pool)
    .await?;

    player.ok_or(StoreError::NotFound)
}

pub async fn set_suspended(pool: &PgPool, id: Uuid, suspended: bool) -> StoreResult<Player> {
    let player = sqlx::query_as::<_, Player>(
        "UPDATE players SET is_suspended = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(suspended)
    .fetch_optional(pool)
    .await?;

    player.ok_or(StoreError::NotFound)
}

pub async fn set_admin(pool: &PgPool, id: Uuid, is_admin: bool) -> StoreResult<Player> {
    let player = sqlx::query_as::<_, Player>(
        "UPDATE players SET is_admin = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(is_admin)
    .fetch_optional(pool)
    .await?;

    player.ok_or(StoreError::NotFound)
}
