use chrono::NaiveTime;
use uuid::Uuid;

use super::{not_found, EngineError};
use crate::models::{Fixture, NewFixture};
use crate::store::Store;

fn normalize(fixture: &NewFixture) -> Result<NewFixture, EngineError> {
    let home_team = fixture.home_team.trim();
    let away_team = fixture.away_team.trim();

    if home_team.is_empty() || away_team.is_empty() {
        return Err(EngineError::InvalidFixture("both teams are required".into()));
    }
    if home_team.eq_ignore_ascii_case(away_team) {
        return Err(EngineError::InvalidFixture(
            "home and away teams cannot be the same".into(),
        ));
    }

    Ok(NewFixture {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        match_day: fixture.match_day,
        kickoff_time: fixture.kickoff_time,
    })
}

/// Schedule a fixture. Without an explicit kickoff time, `default_kickoff` applies.
pub async fn create_fixture(
    store: &dyn Store,
    fixture: &NewFixture,
    default_kickoff: NaiveTime,
) -> Result<Fixture, EngineError> {
    let fixture = normalize(fixture)?;
    let kickoff_time = fixture.kickoff_time.unwrap_or(default_kickoff);

    let created = store.insert_fixture(&fixture, kickoff_time).await?;
    tracing::info!(
        fixture_id = %created.id,
        fixture = %created.label(),
        kickoff = %created.kickoff_at(),
        "Fixture created"
    );
    Ok(created)
}

pub async fn delete_fixture(store: &dyn Store, fixture_id: Uuid) -> Result<(), EngineError> {
    store
        .delete_fixture(fixture_id)
        .await
        .map_err(not_found("fixture", fixture_id))?;
    tracing::warn!(fixture_id = %fixture_id, "Fixture deleted");
    Ok(())
}
