use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::{NewPrediction, Outcome, PairFilter, Prediction, PredictionRow};

/// Predictions matching the filter, newest submission first.
pub async fn find_predictions(pool: &PgPool, filter: &PairFilter) -> StoreResult<Vec<Prediction>> {
    let rows = sqlx::query_as::<_, PredictionRow>(
        r#"
        SELECT * FROM predictions
        WHERE ($1::uuid IS NULL OR player_id = $1)
          AND ($2::uuid IS NULL OR fixture_id = $2)
        ORDER BY submitted_at DESC
        "#,
    )
    .bind(filter.player_id)
    .bind(filter.fixture_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|r| Prediction::try_from(r).map_err(StoreError::from))
        .collect()
}

/// Insert a prediction. Fails with a constraint violation if the pair already has one.
pub async fn insert_prediction(pool: &PgPool, new: &NewPrediction) -> StoreResult<Prediction> {
    let row = sqlx::query_as::<_, PredictionRow>(
        r#"
        INSERT INTO predictions (player_id, fixture_id, predicted_outcome, submitted_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(new.player_id)
    .bind(new.fixture_id)
    .bind(new.predicted_outcome.code())
    .bind(new.submitted_at)
    .fetch_one(pool)
    .await?;

    Ok(row.try_into()?)
}

/// Replace the outcome and timestamp of an existing prediction.
pub async fn update_prediction(
    pool: &PgPool,
    player_id: Uuid,
    fixture_id: Uuid,
    outcome: Outcome,
    submitted_at: DateTime<Utc>,
) -> StoreResult<Prediction> {
    let row = sqlx::query_as::<_, PredictionRow>(
        r#"
        UPDATE predictions
        SET predicted_outcome = $3, submitted_at = $4
        WHERE player_id = $1 AND fixture_id = $2
        RETURNING *
        "#,
    )
    .bind(player_id)
    .bind(fixture_id)
    .bind(outcome.code())
    .bind(submitted_at)
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or(StoreError::NotFound)?;
    Ok(row.try_into()?)
}
