use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AwardStore, FixtureStore, PlayerStore, PredictionStore, Store, StoreResult};
use crate::db::{award_repo, fixture_repo, player_repo, prediction_repo};
use crate::models::{
    Award, Fixture, FixtureFilter, NewAward, NewFixture, NewPrediction, Outcome, PairFilter,
    Player, PlayerProfile, Prediction,
};

/// Postgres-backed store delegating to the repository functions.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FixtureStore for PgStore {
    async fn insert_fixture(
        &self,
        fixture: &NewFixture,
        kickoff_time: NaiveTime,
    ) -> StoreResult<Fixture> {
        fixture_repo::insert_fixture(&self.pool, fixture, kickoff_time).await
    }

    async fn get_fixture(&self, id: Uuid) -> StoreResult<Option<Fixture>> {
        fixture_repo::get_fixture(&self.pool, id).await
    }

    async fn list_fixtures(&self, filter: &FixtureFilter) -> StoreResult<Vec<Fixture>> {
        fixture_repo::list_fixtures(&self.pool, filter).await
    }

    async fn list_fixtures_with_unscored_predictions(&self) -> StoreResult<Vec<Fixture>> {
        fixture_repo::list_fixtures_with_unscored_predictions(&self.pool).await
    }

    async fn set_outcome(&self, id: Uuid, outcome: Option<Outcome>) -> StoreResult<Fixture> {
        fixture_repo::set_outcome(&self.pool, id, outcome).await
    }

    async fn delete_fixture(&self, id: Uuid) -> StoreResult<()> {
        fixture_repo::delete_fixture(&self.pool, id).await
    }
}

#[async_trait]
impl PlayerStore for PgStore {
    async fn insert_player(&self, profile: &PlayerProfile) -> StoreResult<Player> {
        player_repo::insert_player(&self.pool, profile).await
    }

    async fn get_player(&self, id: Uuid) -> StoreResult<Option<Player>> {
        player_repo::get_player(&self.pool, id).await
    }

    async fn get_player_by_username(&self, username: &str) -> StoreResult<Option<Player>> {
        player_repo::get_player_by_username(&self.pool, username).await
    }

    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        player_repo::list_players(&self.pool).await
    }

    async fn update_profile(&self, id: Uuid, profile: &PlayerProfile) -> StoreResult<Player> {
        player_repo::update_profile(&self.pool, id, profile).await
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> StoreResult<Player> {
        player_repo::set_suspended(&self.pool, id, suspended).await
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Player> {
        player_repo::set_admin(&self.pool, id, is_admin).await
    }
}

#[async_trait]
impl PredictionStore for PgStore {
    async fn find_predictions(&self, filter: &PairFilter) -> StoreResult<Vec<Prediction>> {
        prediction_repo::find_predictions(&self.pool, filter).await
    }

    async fn insert_prediction(&self, new: &NewPrediction) -> StoreResult<Prediction> {
        prediction_repo::insert_prediction(&self.pool, new).await
    }

    async fn update_prediction(
        &self,
        player_id: Uuid,
        fixture_id: Uuid,
        outcome: Outcome,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Prediction> {
        prediction_repo::update_prediction(&self.pool, player_id, fixture_id, outcome, submitted_at)
            .await
    }
}

#[async_trait]
impl AwardStore for PgStore {
    async fn find_awards(&self, filter: &PairFilter) -> StoreResult<Vec<Award>> {
        award_repo::find_awards(&self.pool, filter).await
    }

    async fn insert_award(&self, new: &NewAward) -> StoreResult<Award> {
        award_repo::insert_award(&self.pool, new).await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
