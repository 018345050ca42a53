use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the players table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub username: String,
    pub club_supported: String,
    pub nationality: String,
    pub is_admin: bool,
    pub is_suspended: bool,
    pub joined_at: DateTime<Utc>,
}

/// Fields a player chooses at registration and may edit later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    pub club_supported: String,
    pub nationality: String,
}
