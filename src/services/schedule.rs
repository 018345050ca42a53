use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::EngineError;
use crate::models::{Fixture, FixtureFilter, FixtureTiming};
use crate::store::Store;

/// Upcoming fixtures soonest first, past fixtures most recent first, or all by kickoff.
pub async fn list_fixtures(
    store: &dyn Store,
    timing: Option<FixtureTiming>,
    now: DateTime<Utc>,
) -> Result<Vec<Fixture>, EngineError> {
    let filter = timing
        .map(|t| FixtureFilter::timing(t, now))
        .unwrap_or_default();

    let mut fixtures = store.list_fixtures(&filter).await?;
    if timing == Some(FixtureTiming::Past) {
        fixtures.reverse();
    }

    Ok(fixtures)
}

pub async fn get_fixture(store: &dyn Store, fixture_id: Uuid) -> Result<Fixture, EngineError> {
    store
        .get_fixture(fixture_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("fixture {fixture_id}")))
}
