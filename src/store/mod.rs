//! Storage seams consumed by the engine.
//!
//! The engine never talks to sqlx directly; it goes through these traits so the
//! same rules run against Postgres in production and [`MemoryStore`] in tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub use crate::db::{StoreError, StoreResult};

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::models::{
    Award, Fixture, FixtureFilter, NewAward, NewFixture, NewPrediction, Outcome, PairFilter,
    Player, PlayerProfile, Prediction,
};

#[async_trait]
pub trait FixtureStore: Send + Sync {
    async fn insert_fixture(&self, fixture: &NewFixture, kickoff_time: NaiveTime)
        -> StoreResult<Fixture>;

    async fn get_fixture(&self, id: Uuid) -> StoreResult<Option<Fixture>>;

    async fn list_fixtures(&self, filter: &FixtureFilter) -> StoreResult<Vec<Fixture>>;

    /// Fixtures with at least one prediction lacking an award, in any resolution state.
    async fn list_fixtures_with_unscored_predictions(&self) -> StoreResult<Vec<Fixture>>;

    /// `NotFound` if the fixture does not exist.
    async fn set_outcome(&self, id: Uuid, outcome: Option<Outcome>) -> StoreResult<Fixture>;

    /// Removes the fixture together with its predictions and awards.
    async fn delete_fixture(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// `ConstraintViolation` if the username is taken.
    async fn insert_player(&self, profile: &PlayerProfile) -> StoreResult<Player>;

    async fn get_player(&self, id: Uuid) -> StoreResult<Option<Player>>;

    async fn get_player_by_username(&self, username: &str) -> StoreResult<Option<Player>>;

    async fn list_players(&self) -> StoreResult<Vec<Player>>;

    async fn update_profile(&self, id: Uuid, profile: &PlayerProfile) -> StoreResult<Player>;

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> StoreResult<Player>;

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Player>;
}

#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Newest submission first.
    async fn find_predictions(&self, filter: &PairFilter) -> StoreResult<Vec<Prediction>>;

    /// `ConstraintViolation` if the (player, fixture) pair already has a prediction.
    async fn insert_prediction(&self, new: &NewPrediction) -> StoreResult<Prediction>;

    /// `NotFound` if the pair has no prediction yet.
    async fn update_prediction(
        &self,
        player_id: Uuid,
        fixture_id: Uuid,
        outcome: Outcome,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Prediction>;
}

#[async_trait]
pub trait AwardStore: Send + Sync {
    async fn find_awards(&self, filter: &PairFilter) -> StoreResult<Vec<Award>>;

    /// `ConstraintViolation` if the (player, fixture) pair already has an award.
    async fn insert_award(&self, new: &NewAward) -> StoreResult<Award>;
}

/// Everything the engine and the HTTP layer need from the system of record.
#[async_trait]
pub trait Store: FixtureStore + PlayerStore + PredictionStore + AwardStore {
    async fn ping(&self) -> StoreResult<()>;
}
