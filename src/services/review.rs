use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::EngineError;
use crate::models::{Fixture, FixtureFilter, Outcome, PairFilter, Player};
use crate::store::Store;

fn search_needle(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerQuery {
    /// Case-insensitive match against username, club and nationality.
    pub search: Option<String>,
}

fn player_matches(player: &Player, needle: &str) -> bool {
    [&player.username, &player.club_supported, &player.nationality]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Registered players in join order, optionally narrowed by a search term.
pub async fn list_players(
    store: &dyn Store,
    query: &PlayerQuery,
) -> Result<Vec<Player>, EngineError> {
    let players = store.list_players().await?;
    let Some(needle) = search_needle(query.search.as_deref()) else {
        return Ok(players);
    };

    Ok(players
        .into_iter()
        .filter(|p| player_matches(p, &needle))
        .collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionQuery {
    pub fixture_id: Option<Uuid>,
    /// Case-insensitive match against username and team names.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRow {
    pub prediction_id: Uuid,
    pub player_id: Uuid,
    pub username: String,
    pub fixture_id: Uuid,
    pub fixture: String,
    pub kickoff_at: DateTime<Utc>,
    pub predicted_outcome: Outcome,
    pub submitted_at: DateTime<Utc>,
}

/// Every prediction with its player and fixture, newest first.
pub async fn list_submissions(
    store: &dyn Store,
    query: &SubmissionQuery,
) -> Result<Vec<SubmissionRow>, EngineError> {
    let filter = PairFilter {
        player_id: None,
        fixture_id: query.fixture_id,
    };
    let predictions = store.find_predictions(&filter).await?;
    let players: HashMap<Uuid, Player> = store
        .list_players()
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let fixtures: HashMap<Uuid, Fixture> = store
        .list_fixtures(&FixtureFilter::default())
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    let needle = search_needle(query.search.as_deref());

    let rows = predictions
        .into_iter()
        .filter_map(|p| {
            let player = players.get(&p.player_id)?;
            let fixture = fixtures.get(&p.fixture_id)?;
            Some(SubmissionRow {
                prediction_id: p.id,
                player_id: p.player_id,
                username: player.username.clone(),
                fixture_id: p.fixture_id,
                fixture: fixture.label(),
                kickoff_at: fixture.kickoff_at(),
                predicted_outcome: p.predicted_outcome,
                submitted_at: p.submitted_at,
            })
        })
        .filter(|row| match &needle {
            Some(n) => {
                row.username.to_lowercase().contains(n) || row.fixture.to_lowercase().contains(n)
            }
            None => true,
        })
        .collect();

    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringViewRow {
    pub prediction_id: Uuid,
    pub player_id: Uuid,
    pub username: String,
    pub predicted_outcome: Outcome,
    /// `None` until the fixture has an outcome.
    pub correct: Option<bool>,
    pub points_assigned: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureScoringView {
    pub fixture: Fixture,
    pub predictions: Vec<ScoringViewRow>,
    /// True when the fixture is resolved and some prediction has no award yet.
    pub can_assign: bool,
}

/// Predictions for one fixture with their correctness and award status.
pub async fn fixture_scoring_view(
    store: &dyn Store,
    fixture_id: Uuid,
) -> Result<FixtureScoringView, EngineError> {
    let fixture = store
        .get_fixture(fixture_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("fixture {fixture_id}")))?;

    let filter = PairFilter::for_fixture(fixture_id);
    let predictions = store.find_predictions(&filter).await?;
    let awarded: HashSet<Uuid> = store
        .find_awards(&filter)
        .await?
        .into_iter()
        .map(|a| a.player_id)
        .collect();
    let players: HashMap<Uuid, String> = store
        .list_players()
        .await?
        .into_iter()
        .map(|p| (p.id, p.username))
        .collect();

    let rows: Vec<ScoringViewRow> = predictions
        .into_iter()
        .map(|p| ScoringViewRow {
            prediction_id: p.id,
            player_id: p.player_id,
            username: players.get(&p.player_id).cloned().unwrap_or_default(),
            predicted_outcome: p.predicted_outcome,
            correct: fixture.outcome.map(|o| o == p.predicted_outcome),
            points_assigned: awarded.contains(&p.player_id),
        })
        .collect();

    let can_assign = fixture.is_resolved() && rows.iter().any(|r| !r.points_assigned);

    Ok(FixtureScoringView {
        fixture,
        predictions: rows,
        can_assign,
    })
}
