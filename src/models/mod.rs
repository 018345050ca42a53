pub mod award;
pub mod fixture;
pub mod player;
pub mod prediction;

pub use award::{Award, AwardRow, NewAward};
pub use fixture::{Fixture, FixtureFilter, FixtureRow, FixtureTiming, NewFixture};
pub use player::{Player, PlayerProfile};
pub use prediction::{NewPrediction, Prediction, PredictionRow};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Points granted for predicting a fixture's outcome correctly.
pub const CORRECT_OUTCOME_POINTS: u32 = 3;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a fixture, or the result a player predicted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "H")]
    HomeWin,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "A")]
    AwayWin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid outcome '{0}', expected one of H, D, A")]
pub struct InvalidOutcome(pub String);

impl Outcome {
    /// Single-letter code stored in the database and used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Outcome::HomeWin => "H",
            Outcome::Draw => "D",
            Outcome::AwayWin => "A",
        }
    }
}

impl FromStr for Outcome {
    type Err = InvalidOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H" | "h" => Ok(Outcome::HomeWin),
            "D" | "d" => Ok(Outcome::Draw),
            "A" | "a" => Ok(Outcome::AwayWin),
            _ => Err(InvalidOutcome(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// PairFilter
// ---------------------------------------------------------------------------

/// Selects predictions or awards by player and/or fixture; `None` matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairFilter {
    pub player_id: Option<Uuid>,
    pub fixture_id: Option<Uuid>,
}

impl PairFilter {
    pub fn for_player(player_id: Uuid) -> Self {
        Self {
            player_id: Some(player_id),
            fixture_id: None,
        }
    }

    pub fn for_fixture(fixture_id: Uuid) -> Self {
        Self {
            player_id: None,
            fixture_id: Some(fixture_id),
        }
    }

    pub fn for_pair(player_id: Uuid, fixture_id: Uuid) -> Self {
        Self {
            player_id: Some(player_id),
            fixture_id: Some(fixture_id),
        }
    }

    pub fn matches(&self, player_id: Uuid, fixture_id: Uuid) -> bool {
        self.player_id.map_or(true, |p| p == player_id)
            && self.fixture_id.map_or(true, |f| f == fixture_id)
    }
}
