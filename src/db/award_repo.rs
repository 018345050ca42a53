use sqlx::PgPool;

use super::{StoreError, StoreResult};
use crate::models::{Award, AwardRow, NewAward, PairFilter};

/// Awards matching the filter, newest first.
pub async fn find_awards(pool: &PgPool, filter: &PairFilter) -> StoreResult<Vec<Award>> {
    let rows = sqlx::query_as::<_, AwardRow>(
        r#"
        SELECT * FROM awards
        WHERE ($1::uuid IS NULL OR player_id = $1)
          AND ($2::uuid IS NULL OR fixture_id = $2)
        ORDER BY awarded_at DESC
        "#,
    )
    .bind(filter.player_id)
    .bind(filter.fixture_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|r| Award::try_from(r).map_err(StoreError::Corrupt))
        .collect()
}

/// Insert an award. The unique (player_id, fixture_id) constraint rejects a second
/// award for the same pair with a constraint violation.
pub async fn insert_award(pool: &PgPool, new: &NewAward) -> StoreResult<Award> {
    let points = i32::try_from(new.points_earned)
        .map_err(|_| StoreError::Corrupt(format!("points out of range: {}", new.points_earned)))?;

    let row = sqlx::query_as::<_, AwardRow>(
        r#"
        INSERT INTO awards (player_id, fixture_id, points_earned, awarded_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(new.player_id)
    .bind(new.fixture_id)
    .bind(points)
    .bind(new.awarded_at)
    .fetch_one(pool)
    .await?;

    Award::try_from(row).map_err(StoreError::Corrupt)
}
