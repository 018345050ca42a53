use uuid::Uuid;

use super::{not_found, EngineError};
use crate::models::{Player, PlayerProfile};
use crate::store::Store;

const MIN_USERNAME_LEN: usize = 3;

/// Trim and check profile fields.
fn normalize(profile: &PlayerProfile) -> Result<PlayerProfile, EngineError> {
    let username = profile.username.trim();
    let club_supported = profile.club_supported.trim();
    let nationality = profile.nationality.trim();

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(EngineError::InvalidPlayer(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if club_supported.is_empty() {
        return Err(EngineError::InvalidPlayer("supported club is required".into()));
    }
    if nationality.is_empty() {
        return Err(EngineError::InvalidPlayer("nationality is required".into()));
    }

    Ok(PlayerProfile {
        username: username.to_string(),
        club_supported: club_supported.to_string(),
        nationality: nationality.to_string(),
    })
}

async fn ensure_username_free(
    store: &dyn Store,
    username: &str,
    except: Option<Uuid>,
) -> Result<(), EngineError> {
    match store.get_player_by_username(username).await? {
        Some(existing) if Some(existing.id) != except => Err(EngineError::ConstraintViolation(
            format!("username '{username}' is already taken"),
        )),
        _ => Ok(()),
    }
}

pub async fn register_player(
    store: &dyn Store,
    profile: &PlayerProfile,
) -> Result<Player, EngineError> {
    let profile = normalize(profile)?;
    ensure_username_free(store, &profile.username, None).await?;

    let player = store.insert_player(&profile).await?;
    tracing::info!(player_id = %player.id, username = %player.username, "Player registered");
    Ok(player)
}

pub async fn update_profile(
    store: &dyn Store,
    player_id: Uuid,
    profile: &PlayerProfile,
) -> Result<Player, EngineError> {
    let profile = normalize(profile)?;
    ensure_username_free(store, &profile.username, Some(player_id)).await?;

    let player = store
        .update_profile(player_id, &profile)
        .await
        .map_err(not_found("player", player_id))?;
    tracing::info!(player_id = %player_id, "Player profile updated");
    Ok(player)
}

/// Suspended players keep their predictions and awards but cannot submit new ones.
pub async fn set_suspended(
    store: &dyn Store,
    player_id: Uuid,
    suspended: bool,
) -> Result<Player, EngineError> {
    let player = store
        .set_suspended(player_id, suspended)
        .await
        .map_err(not_found("player", player_id))?;
    tracing::warn!(player_id = %player_id, suspended, "Player suspension changed");
    Ok(player)
}

pub async fn set_admin(
    store: &dyn Store,
    player_id: Uuid,
    is_admin: bool,
) -> Result<Player, EngineError> {
    let player = store
        .set_admin(player_id, is_admin)
        .await
        .map_err(not_found("player", player_id))?;
    tracing::info!(player_id = %player_id, is_admin, "Player admin flag changed");
    Ok(player)
}
