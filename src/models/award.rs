use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the awards table.
#[derive(Debug, Clone, FromRow)]
pub struct AwardRow {
    pub id: Uuid,
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub points_earned: i32,
    pub awarded_at: DateTime<Utc>,
}

/// Points granted for one (player, fixture) pair. Created at most once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: Uuid,
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub points_earned: u32,
    pub awarded_at: DateTime<Utc>,
}

impl TryFrom<AwardRow> for Award {
    type Error = String;

    fn try_from(row: AwardRow) -> Result<Self, Self::Error> {
        let points_earned = u32::try_from(row.points_earned)
            .map_err(|_| format!("award {} has negative points {}", row.id, row.points_earned))?;
        Ok(Self {
            id: row.id,
            player_id: row.player_id,
            fixture_id: row.fixture_id,
            points_earned,
            awarded_at: row.awarded_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewAward {
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub points_earned: u32,
    pub awarded_at: DateTime<Utc>,
}
