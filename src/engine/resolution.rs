use metrics::counter;
use uuid::Uuid;

use super::{not_found, EngineError};
use crate::models::{Fixture, Outcome, PairFilter};
use crate::store::Store;

/// Set a fixture's outcome, or clear it with `None`.
///
/// Scoring is a separate step. Awards already created for the fixture are left
/// in place when the outcome is cleared or changed; they are a permanent record.
pub async fn resolve_outcome(
    store: &dyn Store,
    fixture_id: Uuid,
    outcome: Option<Outcome>,
) -> Result<Fixture, EngineError> {
    let previous = store
        .get_fixture(fixture_id)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("fixture {fixture_id}")))?;

    let fixture = store
        .set_outcome(fixture_id, outcome)
        .await
        .map_err(not_found("fixture", fixture_id))?;

    counter!("fixture_outcomes_set_total").increment(1);

    match outcome {
        Some(o) => tracing::info!(fixture_id = %fixture_id, outcome = %o, "Fixture resolved"),
        None => tracing::info!(fixture_id = %fixture_id, "Fixture outcome cleared"),
    }

    if previous.outcome.is_some() && previous.outcome != outcome {
        let awards = store
            .find_awards(&PairFilter::for_fixture(fixture_id))
            .await?;
        if !awards.is_empty() {
            tracing::warn!(
                fixture_id = %fixture_id,
                awards = awards.len(),
                previous = ?previous.outcome.map(Outcome::code),
                "Outcome changed after scoring; existing awards are kept"
            );
        }
    }

    Ok(fixture)
}
