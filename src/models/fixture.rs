use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{InvalidOutcome, Outcome};

/// Database row for the fixtures table, before the outcome code is validated.
#[derive(Debug, Clone, FromRow)]
pub struct FixtureRow {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub match_day: NaiveDate,
    pub kickoff_time: NaiveTime,
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled match. `outcome` is `None` while the fixture is unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub match_day: NaiveDate,
    pub kickoff_time: NaiveTime,
    pub outcome: Option<Outcome>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FixtureRow> for Fixture {
    type Error = InvalidOutcome;

    fn try_from(row: FixtureRow) -> Result<Self, Self::Error> {
        let outcome = row.outcome.as_deref().map(str::parse).transpose()?;
        Ok(Self {
            id: row.id,
            home_team: row.home_team,
            away_team: row.away_team,
            match_day: row.match_day,
            kickoff_time: row.kickoff_time,
            outcome,
            created_at: row.created_at,
        })
    }
}

impl Fixture {
    /// Match day and kickoff time combined into a single UTC instant.
    pub fn kickoff_at(&self) -> DateTime<Utc> {
        self.match_day.and_time(self.kickoff_time).and_utc()
    }

    /// Predictions are accepted strictly before kickoff.
    pub fn accepts_predictions_at(&self, now: DateTime<Utc>) -> bool {
        now < self.kickoff_at()
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// Request to schedule a new fixture. Kickoff time falls back to the configured default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFixture {
    pub home_team: String,
    pub away_team: String,
    pub match_day: NaiveDate,
    #[serde(default)]
    pub kickoff_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureTiming {
    Upcoming,
    Past,
}

/// Selection criteria for listing fixtures. Results are ordered by kickoff ascending.
#[derive(Debug, Clone, Default)]
pub struct FixtureFilter {
    pub resolved: Option<bool>,
    pub kickoff_after: Option<DateTime<Utc>>,
    pub kickoff_at_or_before: Option<DateTime<Utc>>,
}

impl FixtureFilter {
    pub fn timing(timing: FixtureTiming, now: DateTime<Utc>) -> Self {
        match timing {
            FixtureTiming::Upcoming => Self {
                kickoff_after: Some(now),
                ..Self::default()
            },
            FixtureTiming::Past => Self {
                kickoff_at_or_before: Some(now),
                ..Self::default()
            },
        }
    }

    pub fn matches(&self, fixture: &Fixture) -> bool {
        let kickoff = fixture.kickoff_at();
        self.resolved.map_or(true, |r| fixture.is_resolved() == r)
            && self.kickoff_after.map_or(true, |t| kickoff > t)
            && self.kickoff_at_or_before.map_or(true, |t| kickoff <= t)
    }
}
