use serde::Serialize;

use crate::models::{Award, Fixture, Prediction};

/// Where a (player, fixture) pair stands relative to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairState {
    NoPrediction,
    PredictedPending,
    /// Outcome known, waiting for a scoring run.
    PredictedResolved,
    Scored,
    /// Fixture resolved without a prediction; nothing will ever be awarded.
    Unscored,
}

impl PairState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PairState::Scored | PairState::Unscored)
    }
}

pub fn pair_state(
    fixture: &Fixture,
    prediction: Option<&Prediction>,
    award: Option<&Award>,
) -> PairState {
    match (award, prediction, fixture.is_resolved()) {
        (Some(_), _, _) => PairState::Scored,
        (None, None, false) => PairState::NoPrediction,
        (None, None, true) => PairState::Unscored,
        (None, Some(_), false) => PairState::PredictedPending,
        (None, Some(_), true) => PairState::PredictedResolved,
    }
}
