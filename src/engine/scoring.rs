use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use metrics::counter;
use serde::Serialize;
use uuid::Uuid;

use super::EngineError;
use crate::models::{Award, NewAward, Outcome, PairFilter, CORRECT_OUTCOME_POINTS};
use crate::store::{Store, StoreError};

/// 3 points for the right outcome, nothing otherwise.
pub fn points_for(predicted: Outcome, actual: Outcome) -> u32 {
    if predicted == actual {
        CORRECT_OUTCOME_POINTS
    } else {
        0
    }
}

/// Outcome of scoring one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureScoring {
    pub fixture_id: Uuid,
    pub outcome: Outcome,
    pub awards_created: Vec<Award>,
    /// Predictions skipped because their pair already had an award.
    pub already_scored: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureFailure {
    pub fixture_id: Uuid,
    pub reason: &'static str,
    pub error: String,
}

/// Per-fixture results of a bulk scoring run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoringReport {
    pub scored: Vec<FixtureScoring>,
    /// Fixtures with unscored predictions but no outcome yet.
    pub skipped: Vec<FixtureFailure>,
    pub failed: Vec<FixtureFailure>,
}

impl ScoringReport {
    pub fn awards_created(&self) -> usize {
        self.scored.iter().map(|s| s.awards_created.len()).sum()
    }
}

/// Create one award for every prediction on a resolved fixture whose pair has none yet.
///
/// Safe to repeat: pairs that already hold an award are skipped, and an insert
/// rejected by the award uniqueness constraint counts as already scored.
pub async fn score_fixture(
    store: &dyn Store,
    fixture_id: Uuid,
    now: DateTime<Utc>,
) -> Result<FixtureScoring, EngineError> {
    let fixture = store
        .get_fixture(fixture_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("fixture {fixture_id}")))?;

    let Some(actual) = fixture.outcome else {
        return Err(EngineError::FixtureUnresolved(fixture_id));
    };

    let filter = PairFilter::for_fixture(fixture_id);
    let predictions = store.find_predictions(&filter).await?;
    let scored: HashSet<Uuid> = store
        .find_awards(&filter)
        .await?
        .into_iter()
        .map(|a| a.player_id)
        .collect();

    let mut result = FixtureScoring {
        fixture_id,
        outcome: actual,
        awards_created: Vec::new(),
        already_scored: 0,
    };

    for prediction in predictions {
        if scored.contains(&prediction.player_id) {
            result.already_scored += 1;
            continue;
        }

        let new = NewAward {
            player_id: prediction.player_id,
            fixture_id,
            points_earned: points_for(prediction.predicted_outcome, actual),
            awarded_at: now,
        };

        match store.insert_award(&new).await {
            Ok(award) => {
                counter!("awards_created_total").increment(1);
                result.awards_created.push(award);
            }
            Err(StoreError::ConstraintViolation(_)) => {
                counter!("awards_already_scored_total").increment(1);
                tracing::debug!(
                    player_id = %prediction.player_id,
                    fixture_id = %fixture_id,
                    "Award already exists, skipping"
                );
                result.already_scored += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        fixture_id = %fixture_id,
        outcome = %actual,
        created = result.awards_created.len(),
        already_scored = result.already_scored,
        "Fixture scored"
    );

    Ok(result)
}

/// Score every fixture that still has predictions without awards.
///
/// Fixtures are scored independently with at most `concurrency` in flight. A
/// fixture that fails lands in the report and does not stop the others.
pub async fn score_outstanding(
    store: &dyn Store,
    now: DateTime<Utc>,
    concurrency: usize,
) -> Result<ScoringReport, EngineError> {
    let fixtures = store.list_fixtures_with_unscored_predictions().await?;

    tracing::debug!(count = fixtures.len(), "Scoring outstanding fixtures");

    let results: Vec<(Uuid, Result<FixtureScoring, EngineError>)> = stream::iter(fixtures)
        .map(move |fixture| async move {
            let result = score_fixture(store, fixture.id, now).await;
            (fixture.id, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut report = ScoringReport::default();
    for (fixture_id, result) in results {
        match result {
            Ok(scoring) => report.scored.push(scoring),
            Err(e @ EngineError::FixtureUnresolved(_)) => report.skipped.push(FixtureFailure {
                fixture_id,
                reason: e.reason(),
                error: e.to_string(),
            }),
            Err(e) => {
                counter!("scoring_fixture_failures_total").increment(1);
                tracing::error!(error = %e, fixture_id = %fixture_id, "Failed to score fixture");
                report.failed.push(FixtureFailure {
                    fixture_id,
                    reason: e.reason(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        scored = report.scored.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        awards = report.awards_created(),
        "Outstanding scoring run complete"
    );

    Ok(report)
}
