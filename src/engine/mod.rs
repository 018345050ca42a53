//! Prediction lifecycle and scoring rules.
//!
//! Every operation takes the acting player or fixture id and the current
//! instant explicitly; nothing here reads ambient session state or the clock.

pub mod fixtures;
pub mod players;
pub mod resolution;
pub mod scoring;
pub mod state;
pub mod submission;

pub use fixtures::{create_fixture, delete_fixture};
pub use players::{register_player, set_admin, set_suspended, update_profile};
pub use resolution::resolve_outcome;
pub use scoring::{
    points_for, score_fixture, score_outstanding, FixtureFailure, FixtureScoring, ScoringReport,
};
pub use state::{pair_state, PairState};
pub use submission::{submit_prediction, submit_prediction_code, Submission};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::InvalidOutcome;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("player {0} is suspended")]
    SuspendedPlayer(Uuid),

    #[error("predictions for fixture {fixture_id} closed at kickoff ({kickoff})")]
    DeadlinePassed {
        fixture_id: Uuid,
        kickoff: DateTime<Utc>,
    },

    #[error(transparent)]
    InvalidOutcome(#[from] InvalidOutcome),

    #[error("fixture {0} has no outcome yet")]
    FixtureUnresolved(Uuid),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    #[error("invalid player: {0}")]
    InvalidPlayer(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => EngineError::NotFound("record".into()),
            StoreError::ConstraintViolation(c) => EngineError::ConstraintViolation(c),
            other => EngineError::Store(other),
        }
    }
}

impl EngineError {
    /// Short stable label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::SuspendedPlayer(_) => "suspended_player",
            EngineError::DeadlinePassed { .. } => "deadline_passed",
            EngineError::InvalidOutcome(_) => "invalid_outcome",
            EngineError::FixtureUnresolved(_) => "fixture_unresolved",
            EngineError::NotFound(_) => "not_found",
            EngineError::InvalidFixture(_) => "invalid_fixture",
            EngineError::InvalidPlayer(_) => "invalid_player",
            EngineError::ConstraintViolation(_) => "constraint_violation",
            EngineError::Store(_) => "store",
        }
    }
}

/// Map a store `NotFound` onto a descriptive engine error.
pub(crate) fn not_found(what: &str, id: Uuid) -> impl FnOnce(StoreError) -> EngineError + '_ {
    move |e| match e {
        StoreError::NotFound => EngineError::NotFound(format!("{what} {id}")),
        other => other.into(),
    }
}
