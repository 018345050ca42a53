use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{InvalidOutcome, Outcome};

/// Database row for the predictions table.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionRow {
    pub id: Uuid,
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub predicted_outcome: String,
    pub submitted_at: DateTime<Utc>,
}

/// A player's latest pick for a fixture. Unique per (player, fixture).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub predicted_outcome: Outcome,
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<PredictionRow> for Prediction {
    type Error = InvalidOutcome;

    fn try_from(row: PredictionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            player_id: row.player_id,
            fixture_id: row.fixture_id,
            predicted_outcome: row.predicted_outcome.parse()?,
            submitted_at: row.submitted_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub player_id: Uuid,
    pub fixture_id: Uuid,
    pub predicted_outcome: Outcome,
    pub submitted_at: DateTime<Utc>,
}
