use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AwardStore, FixtureStore, PlayerStore, PredictionStore, Store, StoreError, StoreResult,
};
use crate::models::{
    Award, Fixture, FixtureFilter, NewAward, NewFixture, NewPrediction, Outcome, PairFilter,
    Player, PlayerProfile, Prediction,
};

type Pair = (Uuid, Uuid);

#[derive(Debug, Default)]
struct Tables {
    players: HashMap<Uuid, Player>,
    fixtures: HashMap<Uuid, Fixture>,
    predictions: HashMap<Pair, Prediction>,
    awards: HashMap<Pair, Award>,
}

impl Tables {
    fn username_taken(&self, username: &str, except: Option<Uuid>) -> bool {
        self.players
            .values()
            .any(|p| Some(p.id) != except && p.username.eq_ignore_ascii_case(username))
    }
}

/// In-process store with the same uniqueness and cascade rules as the Postgres schema.
///
/// Used when no `DATABASE_URL` is configured and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FixtureStore for MemoryStore {
    async fn insert_fixture(
        &self,
        fixture: &NewFixture,
        kickoff_time: NaiveTime,
    ) -> StoreResult<Fixture> {
        if fixture.home_team == fixture.away_team {
            return Err(StoreError::ConstraintViolation("fixtures_check".into()));
        }

        let row = Fixture {
            id: Uuid::new_v4(),
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            match_day: fixture.match_day,
            kickoff_time,
            outcome: None,
            created_at: Utc::now(),
        };

        self.tables.write().await.fixtures.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_fixture(&self, id: Uuid) -> StoreResult<Option<Fixture>> {
        Ok(self.tables.read().await.fixtures.get(&id).cloned())
    }

    async fn list_fixtures(&self, filter: &FixtureFilter) -> StoreResult<Vec<Fixture>> {
        let tables = self.tables.read().await;
        let mut fixtures: Vec<Fixture> = tables
            .fixtures
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        fixtures.sort_by_key(|f| (f.kickoff_at(), f.created_at));
        Ok(fixtures)
    }

    async fn list_fixtures_with_unscored_predictions(&self) -> StoreResult<Vec<Fixture>> {
        let tables = self.tables.read().await;
        let mut fixtures: Vec<Fixture> = tables
            .fixtures
            .values()
            .filter(|f| {
                tables
                    .predictions
                    .keys()
                    .any(|pair| pair.1 == f.id && !tables.awards.contains_key(pair))
            })
            .cloned()
            .collect();
        fixtures.sort_by_key(|f| (f.kickoff_at(), f.created_at));
        Ok(fixtures)
    }

    async fn set_outcome(&self, id: Uuid, outcome: Option<Outcome>) -> StoreResult<Fixture> {
        let mut tables = self.tables.write().await;
        let fixture = tables.fixtures.get_mut(&id).ok_or(StoreError::NotFound)?;
        fixture.outcome = outcome;
        Ok(fixture.clone())
    }

    async fn delete_fixture(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.fixtures.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        tables.predictions.retain(|pair, _| pair.1 != id);
        tables.awards.retain(|pair, _| pair.1 != id);
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn insert_player(&self, profile: &PlayerProfile) -> StoreResult<Player> {
        let mut tables = self.tables.write().await;
        if tables.username_taken(&profile.username, None) {
            return Err(StoreError::ConstraintViolation("players_username_key".into()));
        }

        let player = Player {
            id: Uuid::new_v4(),
            username: profile.username.clone(),
            club_supported: profile.club_supported.clone(),
            nationality: profile.nationality.clone(),
            is_admin: false,
            is_suspended: false,
            joined_at: Utc::now(),
        };
        tables.players.insert(player.id, player.clone());
        Ok(player)
    }

    async fn get_player(&self, id: Uuid) -> StoreResult<Option<Player>> {
        Ok(self.tables.read().await.players.get(&id).cloned())
    }

    async fn get_player_by_username(&self, username: &str) -> StoreResult<Option<Player>> {
        Ok(self
            .tables
            .read()
            .await
            .players
            .values()
            .find(|p| p.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        let mut players: Vec<Player> =
            self.tables.read().await.players.values().cloned().collect();
        players.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.username.cmp(&b.username)));
        Ok(players)
    }

    async fn update_profile(&self, id: Uuid, profile: &PlayerProfile) -> StoreResult<Player> {
        let mut tables = self.tables.write().await;
        if tables.username_taken(&profile.username, Some(id)) {
            return Err(StoreError::ConstraintViolation("players_username_key".into()));
        }
        let player = tables.players.get_mut(&id).ok_or(StoreError::NotFound)?;
        player.username = profile.username.clone();
        player.club_supported = profile.club_supported.clone();
        player.nationality = profile.nationality.clone();
        Ok(player.clone())
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> StoreResult<Player> {
        let mut tables = self.tables.write().await;
        let player = tables.players.get_mut(&id).ok_or(StoreError::NotFound)?;
        player.is_suspended = suspended;
        Ok(player.clone())
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Player> {
        let mut tables = self.tables.write().await;
        let player = tables.players.get_mut(&id).ok_or(StoreError::NotFound)?;
        player.is_admin = is_admin;
        Ok(player.clone())
    }
}

#[async_trait]
impl PredictionStore for MemoryStore {
    async fn find_predictions(&self, filter: &PairFilter) -> StoreResult<Vec<Prediction>> {
        let tables = self.tables.read().await;
        let mut predictions: Vec<Prediction> = tables
            .predictions
            .values()
            .filter(|p| filter.matches(p.player_id, p.fixture_id))
            .cloned()
            .collect();
        predictions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(predictions)
    }

    async fn insert_prediction(&self, new: &NewPrediction) -> StoreResult<Prediction> {
        let mut tables = self.tables.write().await;
        if !tables.players.contains_key(&new.player_id)
            || !tables.fixtures.contains_key(&new.fixture_id)
        {
            return Err(StoreError::NotFound);
        }

        let pair = (new.player_id, new.fixture_id);
        if tables.predictions.contains_key(&pair) {
            return Err(StoreError::ConstraintViolation(
                "predictions_player_id_fixture_id_key".into(),
            ));
        }

        let prediction = Prediction {
            id: Uuid::new_v4(),
            player_id: new.player_id,
            fixture_id: new.fixture_id,
            predicted_outcome: new.predicted_outcome,
            submitted_at: new.submitted_at,
        };
        tables.predictions.insert(pair, prediction.clone());
        Ok(prediction)
    }

    async fn update_prediction(
        &self,
        player_id: Uuid,
        fixture_id: Uuid,
        outcome: Outcome,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Prediction> {
        let mut tables = self.tables.write().await;
        let prediction = tables
            .predictions
            .get_mut(&(player_id, fixture_id))
            .ok_or(StoreError::NotFound)?;
        prediction.predicted_outcome = outcome;
        prediction.submitted_at = submitted_at;
        Ok(prediction.clone())
    }
}

#[async_trait]
impl AwardStore for MemoryStore {
    async fn find_awards(&self, filter: &PairFilter) -> StoreResult<Vec<Award>> {
        let tables = self.tables.read().await;
        let mut awards: Vec<Award> = tables
            .awards
            .values()
            .filter(|a| filter.matches(a.player_id, a.fixture_id))
            .cloned()
            .collect();
        awards.sort_by(|a, b| b.awarded_at.cmp(&a.awarded_at));
        Ok(awards)
    }

    async fn insert_award(&self, new: &NewAward) -> StoreResult<Award> {
        let mut tables = self.tables.write().await;
        let pair = (new.player_id, new.fixture_id);
        if tables.awards.contains_key(&pair) {
            return Err(StoreError::ConstraintViolation(
                "awards_player_id_fixture_id_key".into(),
            ));
        }

        let award = Award {
            id: Uuid::new_v4(),
            player_id: new.player_id,
            fixture_id: new.fixture_id,
            points_earned: new.points_earned,
            awarded_at: new.awarded_at,
        };
        tables.awards.insert(pair, award.clone());
        Ok(award)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
