use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use uuid::Uuid;

use super::EngineError;
use crate::models::{NewPrediction, Outcome, PairFilter, Prediction};
use crate::store::{Store, StoreError};

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub prediction: Prediction,
    /// `false` when an existing prediction for the pair was replaced.
    pub created: bool,
}

/// Same as [`submit_prediction`], taking the outcome as its wire code.
pub async fn submit_prediction_code(
    store: &dyn Store,
    player_id: Uuid,
    fixture_id: Uuid,
    code: &str,
    now: DateTime<Utc>,
) -> Result<Submission, EngineError> {
    let outcome = match code.parse::<Outcome>() {
        Ok(o) => o,
        Err(e) => {
            let err = EngineError::from(e);
            counter!("predictions_rejected_total", "reason" => err.reason()).increment(1);
            return Err(err);
        }
    };
    submit_prediction(store, player_id, fixture_id, outcome, now).await
}

/// Record `player_id`'s pick for `fixture_id`, creating or replacing the single
/// prediction for that pair. Rejected for suspended players and at or after kickoff.
pub async fn submit_prediction(
    store: &dyn Store,
    player_id: Uuid,
    fixture_id: Uuid,
    outcome: Outcome,
    now: DateTime<Utc>,
) -> Result<Submission, EngineError> {
    let result = try_submit(store, player_id, fixture_id, outcome, now).await;

    match &result {
        Ok(submission) => {
            counter!("predictions_submitted_total").increment(1);
            tracing::info!(
                player_id = %player_id,
                fixture_id = %fixture_id,
                outcome = %outcome,
                created = submission.created,
                "Prediction recorded"
            );
        }
        Err(e) => {
            counter!("predictions_rejected_total", "reason" => e.reason()).increment(1);
            tracing::debug!(
                player_id = %player_id,
                fixture_id = %fixture_id,
                reason = e.reason(),
                "Prediction rejected"
            );
        }
    }

    result
}

async fn try_submit(
    store: &dyn Store,
    player_id: Uuid,
    fixture_id: Uuid,
    outcome: Outcome,
    now: DateTime<Utc>,
) -> Result<Submission, EngineError> {
    let player = store
        .get_player(player_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("player {player_id}")))?;

    if player.is_suspended {
        return Err(EngineError::SuspendedPlayer(player_id));
    }

    let fixture = store
        .get_fixture(fixture_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("fixture {fixture_id}")))?;

    if !fixture.accepts_predictions_at(now) {
        return Err(EngineError::DeadlinePassed {
            fixture_id,
            kickoff: fixture.kickoff_at(),
        });
    }

    let existing = store
        .find_predictions(&PairFilter::for_pair(player_id, fixture_id))
        .await?;

    if !existing.is_empty() {
        let prediction = store
            .update_prediction(player_id, fixture_id, outcome, now)
            .await?;
        return Ok(Submission {
            prediction,
            created: false,
        });
    }

    let new = NewPrediction {
        player_id,
        fixture_id,
        predicted_outcome: outcome,
        submitted_at: now,
    };

    match store.insert_prediction(&new).await {
        Ok(prediction) => Ok(Submission {
            prediction,
            created: true,
        }),
        // A concurrent submission created the row first; replace it instead.
        Err(StoreError::ConstraintViolation(_)) => {
            let prediction = store
                .update_prediction(player_id, fixture_id, outcome, now)
                .await?;
            Ok(Submission {
                prediction,
                created: false,
            })
        }
        Err(e) => Err(e.into()),
    }
}
