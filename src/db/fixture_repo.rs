use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::{Fixture, FixtureFilter, FixtureRow, NewFixture, Outcome};

fn into_fixtures(rows: Vec<FixtureRow>) -> StoreResult<Vec<Fixture>> {
    rows.into_iter()
        .map(|r| Fixture::try_from(r).map_err(StoreError::from))
        .collect()
}

/// Schedule a new fixture with an unresolved outcome.
pub async fn insert_fixture(
    pool: &PgPool,
    fixture: &NewFixture,
    kickoff_time: NaiveTime,
) -> StoreResult<Fixture> {
    let row = sqlx::query_as::<_, FixtureRow>(
        r#"
        INSERT INTO fixtures (home_team, away_team, match_day, kickoff_time)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&fixture.home_team)
    .bind(&fixture.away_team)
    .bind(fixture.match_day)
    .bind(kickoff_time)
    .fetch_one(pool)
    .await?;

    Ok(row.try_into()?)
}

/// Fetch a single fixture by id.
pub async fn get_fixture(pool: &PgPool, id: Uuid) -> StoreResult<Option<Fixture>> {
    let row = sqlx::query_as::<_, FixtureRow>("SELECT * FROM fixtures WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| Fixture::try_from(r).map_err(StoreError::from))
        .transpose()
}

/// List fixtures matching the filter, earliest kickoff first.
pub async fn list_fixtures(pool: &PgPool, filter: &FixtureFilter) -> StoreResult<Vec<Fixture>> {
    let rows = sqlx::query_as::<_, FixtureRow>(
        r#"
        SELECT * FROM fixtures
        WHERE ($1::boolean IS NULL OR (outcome IS NOT NULL) = $1)
          AND ($2::timestamp IS NULL OR match_day + kickoff_time > $2)
          AND ($3::timestamp IS NULL OR match_day + kickoff_time <= $3)
        ORDER BY match_day ASC, kickoff_time ASC, created_at ASC
        "#,
    )
    .bind(filter.resolved)
    .bind(filter.kickoff_after.map(|t| t.naive_utc()))
    .bind(filter.kickoff_at_or_before.map(|t| t.naive_utc()))
    .fetch_all(pool)
    .await?;

    into_fixtures(rows)
}

/// Fixtures with at least one prediction that has no award yet.
pub async fn list_fixtures_with_unscored_predictions(pool: &PgPool) -> StoreResult<Vec<Fixture>> {
    let rows = sqlx::query_as::<_, FixtureRow>(
        r#"
        SELECT f.* FROM fixtures f
        WHERE EXISTS (
            SELECT 1 FROM predictions p
            LEFT JOIN awards a
                ON a.player_id = p.player_id AND a.fixture_id = p.fixture_id
            WHERE p.fixture_id = f.id AND a.id IS NULL
        )
        ORDER BY f.match_day ASC, f.kickoff_time ASC, f.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    into_fixtures(rows)
}

/// Set or clear a fixture's outcome.
pub async fn set_outcome(
    pool: &PgPool,
    id: Uuid,
    outcome: Option<Outcome>,
) -> StoreResult<Fixture> {
    let row = sqlx::query_as::<_, FixtureRow>(
        r#"
        UPDATE fixtures
        SET outcome = $2
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(outcome.map(Outcome::code))
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or(StoreError::NotFound)?;
    Ok(row.try_into()?)
}

/// Delete a fixture. Its predictions and awards cascade.
pub async fn delete_fixture(pool: &PgPool, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM fixtures WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}
