use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{pair_state, EngineError, PairState};
use crate::models::{Fixture, FixtureFilter, Outcome, PairFilter};
use crate::store::Store;

/// One row of a player's prediction history.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionHistoryEntry {
    pub prediction_id: Uuid,
    pub fixture: Fixture,
    pub predicted_outcome: Outcome,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub state: PairState,
    /// `None` while the fixture is unresolved; award points, or 0 if not yet awarded.
    pub points_earned: Option<u32>,
    pub correct: Option<bool>,
}

/// A player's predictions, newest submission first.
pub async fn prediction_history(
    store: &dyn Store,
    player_id: Uuid,
) -> Result<Vec<PredictionHistoryEntry>, EngineError> {
    if store.get_player(player_id).await?.is_none() {
        return Err(EngineError::NotFound(format!("player {player_id}")));
    }

    let filter = PairFilter::for_player(player_id);
    let predictions = store.find_predictions(&filter).await?;
    let awards: HashMap<Uuid, _> = store
        .find_awards(&filter)
        .await?
        .into_iter()
        .map(|a| (a.fixture_id, a))
        .collect();
    let fixtures: HashMap<Uuid, Fixture> = store
        .list_fixtures(&FixtureFilter::default())
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    let entries = predictions
        .into_iter()
        .filter_map(|prediction| {
            let fixture = fixtures.get(&prediction.fixture_id)?.clone();
            let award = awards.get(&prediction.fixture_id);
            let state = pair_state(&fixture, Some(&prediction), award);
            let points_earned = fixture
                .outcome
                .map(|_| award.map_or(0, |a| a.points_earned));
            let correct = fixture.outcome.map(|o| o == prediction.predicted_outcome);

            Some(PredictionHistoryEntry {
                prediction_id: prediction.id,
                predicted_outcome: prediction.predicted_outcome,
                submitted_at: prediction.submitted_at,
                state,
                points_earned,
                correct,
                fixture,
            })
        })
        .collect();

    Ok(entries)
}
