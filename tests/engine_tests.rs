mod common;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use uuid::Uuid;

use matchday::engine::{self, pair_state, EngineError, PairState};
use matchday::models::{
    Award, Fixture, FixtureFilter, NewAward, NewFixture, NewPrediction, Outcome, PairFilter,
    Player, PlayerProfile, Prediction,
};
use matchday::services::{history, review, standings};
use matchday::store::{
    AwardStore, FixtureStore, MemoryStore, PlayerStore, PredictionStore, Store, StoreError,
    StoreResult,
};

use common::{at, memory_store, seed_fixture, seed_player};

#[tokio::test]
async fn test_resubmission_replaces_until_kickoff() {
    let store = memory_store();
    let store = store.as_ref();
    let kickoff = at(2025, 5, 10, 15, 0, 0);
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", kickoff).await;
    let a = seed_player(store, "footie_fanatic").await;

    let first = engine::submit_prediction(store, a.id, fixture.id, Outcome::HomeWin, at(2025, 5, 9, 10, 0, 0))
        .await
        .unwrap();
    assert!(first.created);
    assert_eq!(first.prediction.predicted_outcome, Outcome::HomeWin);

    let second = engine::submit_prediction(store, a.id, fixture.id, Outcome::Draw, at(2025, 5, 9, 12, 0, 0))
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.prediction.id, first.prediction.id);
    assert_eq!(second.prediction.predicted_outcome, Outcome::Draw);

    let late = engine::submit_prediction(store, a.id, fixture.id, Outcome::AwayWin, at(2025, 5, 10, 15, 0, 1)).await;
    assert!(matches!(late, Err(EngineError::DeadlinePassed { .. })));

    let stored = store
        .find_predictions(&PairFilter::for_pair(a.id, fixture.id))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].predicted_outcome, Outcome::Draw);
    assert_eq!(stored[0].submitted_at, at(2025, 5, 9, 12, 0, 0));
}

#[tokio::test]
async fn test_kickoff_instant_is_exclusive() {
    let store = memory_store();
    let store = store.as_ref();
    let kickoff = at(2025, 5, 10, 15, 0, 0);
    let fixture = seed_fixture(store, "Everton", "Fulham", kickoff).await;
    let p = seed_player(store, "premier_pro").await;

    let just_before = kickoff - Duration::milliseconds(1);
    assert!(engine::submit_prediction(store, p.id, fixture.id, Outcome::Draw, just_before)
        .await
        .is_ok());

    let on_kickoff = engine::submit_prediction(store, p.id, fixture.id, Outcome::HomeWin, kickoff).await;
    assert!(matches!(on_kickoff, Err(EngineError::DeadlinePassed { .. })));
}

#[tokio::test]
async fn test_late_submission_never_creates() {
    let store = memory_store();
    let store = store.as_ref();
    let kickoff = at(2025, 5, 10, 15, 0, 0);
    let fixture = seed_fixture(store, "Brentford", "Wolves", kickoff).await;
    let p = seed_player(store, "late_larry").await;

    let err = engine::submit_prediction(store, p.id, fixture.id, Outcome::HomeWin, kickoff + Duration::hours(2))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DeadlinePassed { .. }));

    // Resolution does not reopen the window
    engine::resolve_outcome(store, fixture.id, Some(Outcome::HomeWin)).await.unwrap();
    assert!(engine::submit_prediction(store, p.id, fixture.id, Outcome::HomeWin, kickoff + Duration::days(1))
        .await
        .is_err());

    let stored = store
        .find_predictions(&PairFilter::for_pair(p.id, fixture.id))
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_identical_resubmission_updates_timestamp() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Leeds", "Burnley", at(2025, 8, 16, 15, 0, 0)).await;
    let p = seed_player(store, "same_again").await;

    engine::submit_prediction(store, p.id, fixture.id, Outcome::AwayWin, at(2025, 8, 10, 9, 0, 0))
        .await
        .unwrap();
    let again = engine::submit_prediction(store, p.id, fixture.id, Outcome::AwayWin, at(2025, 8, 11, 9, 0, 0))
        .await
        .unwrap();

    assert!(!again.created);
    assert_eq!(again.prediction.submitted_at, at(2025, 8, 11, 9, 0, 0));
    let stored = store
        .find_predictions(&PairFilter::for_fixture(fixture.id))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_suspended_player_rejected() {
    let store = memory_store();
    let store = store.as_ref();
    let kickoff = at(2025, 5, 10, 15, 0, 0);
    let fixture = seed_fixture(store, "Aston Villa", "Newcastle", kickoff).await;
    let c = seed_player(store, "banned_barry").await;

    engine::submit_prediction(store, c.id, fixture.id, Outcome::HomeWin, at(2025, 5, 1, 9, 0, 0))
        .await
        .unwrap();
    engine::set_suspended(store, c.id, true).await.unwrap();

    let err = engine::submit_prediction(store, c.id, fixture.id, Outcome::Draw, at(2025, 5, 2, 9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SuspendedPlayer(id) if id == c.id));

    let other = seed_fixture(store, "Everton", "Fulham", kickoff).await;
    let err = engine::submit_prediction(store, c.id, other.id, Outcome::Draw, at(2025, 5, 2, 9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SuspendedPlayer(_)));

    // Existing prediction is untouched and no new one exists
    let stored = store
        .find_predictions(&PairFilter::for_player(c.id))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].predicted_outcome, Outcome::HomeWin);
}

#[tokio::test]
async fn test_suspension_checked_before_deadline() {
    let store = memory_store();
    let store = store.as_ref();
    let kickoff = at(2025, 5, 10, 15, 0, 0);
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", kickoff).await;
    let c = seed_player(store, "banned_barry").await;
    engine::set_suspended(store, c.id, true).await.unwrap();

    let err = engine::submit_prediction(store, c.id, fixture.id, Outcome::Draw, kickoff + Duration::hours(1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SuspendedPlayer(_)));
}

#[tokio::test]
async fn test_invalid_outcome_code() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let p = seed_player(store, "typo_tom").await;

    let err = engine::submit_prediction_code(store, p.id, fixture.id, "X", at(2025, 5, 9, 9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidOutcome(_)));

    let err = engine::submit_prediction_code(store, p.id, fixture.id, "home", at(2025, 5, 9, 9, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidOutcome(_)));
    let stored = store
        .find_predictions(&PairFilter::for_pair(p.id, fixture.id))
        .await
        .unwrap();
    assert!(stored.is_empty());

    let ok = engine::submit_prediction_code(store, p.id, fixture.id, "d", at(2025, 5, 9, 9, 0, 0))
        .await
        .unwrap();
    assert_eq!(ok.prediction.predicted_outcome, Outcome::Draw);
}

#[tokio::test]
async fn test_unknown_player_or_fixture() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let p = seed_player(store, "ghost_hunter").await;
    let now = at(2025, 5, 9, 9, 0, 0);

    let err = engine::submit_prediction(store, Uuid::new_v4(), fixture.id, Outcome::Draw, now)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    let err = engine::submit_prediction(store, p.id, Uuid::new_v4(), Outcome::Draw, now)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn test_scoring_awards_three_or_zero_once() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    let b = seed_player(store, "soccer_sage").await;
    let before = at(2025, 5, 9, 10, 0, 0);

    engine::submit_prediction(store, a.id, fixture.id, Outcome::Draw, before).await.unwrap();
    engine::submit_prediction(store, b.id, fixture.id, Outcome::HomeWin, before).await.unwrap();
    engine::resolve_outcome(store, fixture.id, Some(Outcome::HomeWin)).await.unwrap();

    let first = engine::score_fixture(store, fixture.id, at(2025, 5, 10, 18, 0, 0))
        .await
        .unwrap();
    assert_eq!(first.awards_created.len(), 2);
    assert_eq!(first.already_scored, 0);

    let awards = store
        .find_awards(&PairFilter::for_fixture(fixture.id))
        .await
        .unwrap();
    let points_for = |player_id: Uuid| {
        awards
            .iter()
            .find(|aw| aw.player_id == player_id)
            .map(|aw| aw.points_earned)
    };
    assert_eq!(points_for(a.id), Some(0));
    assert_eq!(points_for(b.id), Some(3));

    let second = engine::score_fixture(store, fixture.id, at(2025, 5, 11, 9, 0, 0))
        .await
        .unwrap();
    assert!(second.awards_created.is_empty());
    assert_eq!(second.already_scored, 2);

    let after = store
        .find_awards(&PairFilter::for_fixture(fixture.id))
        .await
        .unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().all(|aw| awards.contains(aw)));
}

#[tokio::test]
async fn test_scoring_unresolved_fixture_fails() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(store, "eager_eddie").await;
    engine::submit_prediction(store, a.id, fixture.id, Outcome::Draw, at(2025, 5, 9, 10, 0, 0))
        .await
        .unwrap();

    let err = engine::score_fixture(store, fixture.id, at(2025, 5, 10, 18, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::FixtureUnresolved(id) if id == fixture.id));

    let awards = store.find_awards(&PairFilter::default()).await.unwrap();
    assert!(awards.is_empty());
}

#[tokio::test]
async fn test_bulk_scoring_skips_unresolved() {
    let store = memory_store();
    let store = store.as_ref();
    let f1 = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let f2 = seed_fixture(store, "Liverpool", "Everton", at(2025, 5, 11, 16, 30, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    let b = seed_player(store, "soccer_sage").await;
    let before = at(2025, 5, 9, 10, 0, 0);

    engine::submit_prediction(store, a.id, f1.id, Outcome::HomeWin, before).await.unwrap();
    engine::submit_prediction(store, b.id, f1.id, Outcome::AwayWin, before).await.unwrap();
    engine::submit_prediction(store, a.id, f2.id, Outcome::Draw, before).await.unwrap();
    engine::resolve_outcome(store, f1.id, Some(Outcome::HomeWin)).await.unwrap();

    let report = engine::score_outstanding(store, at(2025, 5, 12, 9, 0, 0), 4)
        .await
        .unwrap();

    assert_eq!(report.scored.len(), 1);
    assert_eq!(report.scored[0].fixture_id, f1.id);
    assert_eq!(report.awards_created(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].fixture_id, f2.id);
    assert_eq!(report.skipped[0].reason, "fixture_unresolved");
    assert!(report.failed.is_empty());

    let f2_awards = store.find_awards(&PairFilter::for_fixture(f2.id)).await.unwrap();
    assert!(f2_awards.is_empty());

    // Nothing left on the resolved fixture; rerun only sees F2
    let rerun = engine::score_outstanding(store, at(2025, 5, 12, 10, 0, 0), 1)
        .await
        .unwrap();
    assert!(rerun.scored.is_empty());
    assert_eq!(rerun.skipped.len(), 1);
    assert_eq!(store.find_awards(&PairFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_clearing_outcome_keeps_awards() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    engine::submit_prediction(store, a.id, fixture.id, Outcome::HomeWin, at(2025, 5, 9, 10, 0, 0))
        .await
        .unwrap();
    engine::resolve_outcome(store, fixture.id, Some(Outcome::HomeWin)).await.unwrap();
    engine::score_fixture(store, fixture.id, at(2025, 5, 10, 18, 0, 0)).await.unwrap();

    let cleared = engine::resolve_outcome(store, fixture.id, None).await.unwrap();
    assert!(cleared.outcome.is_none());

    let awards = store.find_awards(&PairFilter::for_fixture(fixture.id)).await.unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].points_earned, 3);

    // Re-resolving to a different outcome does not rescore the pair
    engine::resolve_outcome(store, fixture.id, Some(Outcome::AwayWin)).await.unwrap();
    let rescored = engine::score_fixture(store, fixture.id, at(2025, 5, 11, 9, 0, 0)).await.unwrap();
    assert!(rescored.awards_created.is_empty());
    assert_eq!(rescored.already_scored, 1);
}

#[tokio::test]
async fn test_resolve_unknown_fixture() {
    let store = memory_store();
    let err = engine::resolve_outcome(store.as_ref(), Uuid::new_v4(), Some(Outcome::Draw))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn test_pair_state_follows_lifecycle() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    let pair = PairFilter::for_pair(a.id, fixture.id);

    let state = |f: &Fixture, p: &[Prediction], aw: &[Award]| {
        pair_state(f, p.first(), aw.first())
    };

    let f = store.get_fixture(fixture.id).await.unwrap().unwrap();
    assert_eq!(state(&f, &[], &[]), PairState::NoPrediction);

    engine::submit_prediction(store, a.id, fixture.id, Outcome::Draw, at(2025, 5, 9, 10, 0, 0))
        .await
        .unwrap();
    let preds = store.find_predictions(&pair).await.unwrap();
    assert_eq!(state(&f, &preds, &[]), PairState::PredictedPending);

    let f = engine::resolve_outcome(store, fixture.id, Some(Outcome::Draw)).await.unwrap();
    assert_eq!(state(&f, &preds, &[]), PairState::PredictedResolved);

    engine::score_fixture(store, fixture.id, at(2025, 5, 10, 18, 0, 0)).await.unwrap();
    let awards = store.find_awards(&pair).await.unwrap();
    assert_eq!(state(&f, &preds, &awards), PairState::Scored);

    let b = seed_player(store, "bystander").await;
    let b_preds = store
        .find_predictions(&PairFilter::for_pair(b.id, fixture.id))
        .await
        .unwrap();
    assert_eq!(state(&f, &b_preds, &[]), PairState::Unscored);
}

#[tokio::test]
async fn test_history_and_standings_after_scoring() {
    let store = memory_store();
    let store = store.as_ref();
    let f1 = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let f2 = seed_fixture(store, "Liverpool", "Everton", at(2025, 5, 11, 16, 30, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    let b = seed_player(store, "soccer_sage").await;

    engine::submit_prediction(store, a.id, f1.id, Outcome::Draw, at(2025, 5, 9, 9, 0, 0)).await.unwrap();
    engine::submit_prediction(store, b.id, f1.id, Outcome::HomeWin, at(2025, 5, 9, 9, 0, 0)).await.unwrap();
    engine::submit_prediction(store, b.id, f2.id, Outcome::AwayWin, at(2025, 5, 9, 10, 0, 0)).await.unwrap();
    engine::resolve_outcome(store, f1.id, Some(Outcome::HomeWin)).await.unwrap();
    engine::score_outstanding(store, at(2025, 5, 12, 9, 0, 0), 2).await.unwrap();

    let board = standings::leaderboard(store).await.unwrap();
    assert_eq!(board[0].player_id, b.id);
    assert_eq!(board[0].total_points, 3);
    assert_eq!(board[1].player_id, a.id);
    assert_eq!(board[1].total_points, 0);

    let stats = standings::player_stats(store, b.id).await.unwrap();
    assert_eq!(stats.predictions, 2);
    assert_eq!(stats.correct_predictions, 1);

    let entries = history::prediction_history(store, b.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    // Newest submission first
    assert_eq!(entries[0].fixture.id, f2.id);
    assert_eq!(entries[0].state, PairState::PredictedPending);
    assert_eq!(entries[0].points_earned, None);
    assert_eq!(entries[1].state, PairState::Scored);
    assert_eq!(entries[1].points_earned, Some(3));
    assert_eq!(entries[1].correct, Some(true));

    let view = review::fixture_scoring_view(store, f1.id).await.unwrap();
    assert_eq!(view.predictions.len(), 2);
    assert!(view.predictions.iter().all(|r| r.points_assigned));
    assert!(!view.can_assign);

    let rows = review::list_submissions(
        store,
        &review::SubmissionQuery {
            fixture_id: None,
            search: Some("EVERTON".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "soccer_sage");
}

#[tokio::test]
async fn test_deleting_fixture_cascades() {
    let store = memory_store();
    let store = store.as_ref();
    let fixture = seed_fixture(store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(store, "footie_fanatic").await;
    engine::submit_prediction(store, a.id, fixture.id, Outcome::Draw, at(2025, 5, 9, 10, 0, 0))
        .await
        .unwrap();

    engine::delete_fixture(store, fixture.id).await.unwrap();

    assert!(store.get_fixture(fixture.id).await.unwrap().is_none());
    assert!(store
        .find_predictions(&PairFilter::for_player(a.id))
        .await
        .unwrap()
        .is_empty());
    assert!(matches!(
        engine::delete_fixture(store, fixture.id).await,
        Err(EngineError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let store = memory_store();
    let store = store.as_ref();
    seed_player(store, "kick_king").await;

    let err = engine::register_player(
        store,
        &PlayerProfile {
            username: " Kick_King ".into(),
            club_supported: "Spurs".into(),
            nationality: "Irish".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EngineError::ConstraintViolation(_)));
}

/// Wraps the in-memory store with injectable faults.
struct FaultyStore {
    inner: MemoryStore,
    /// `get_fixture` fails for this id.
    broken_fixture: Option<Uuid>,
    /// `find_awards` always reports nothing, as a reader racing a concurrent scorer would.
    stale_awards: bool,
}

impl FaultyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            broken_fixture: None,
            stale_awards: false,
        }
    }
}

#[async_trait]
impl FixtureStore for FaultyStore {
    async fn insert_fixture(
        &self,
        fixture: &NewFixture,
        kickoff_time: NaiveTime,
    ) -> StoreResult<Fixture> {
        self.inner.insert_fixture(fixture, kickoff_time).await
    }

    async fn get_fixture(&self, id: Uuid) -> StoreResult<Option<Fixture>> {
        if self.broken_fixture == Some(id) {
            return Err(StoreError::Corrupt(format!("fixture {id} unreadable")));
        }
        self.inner.get_fixture(id).await
    }

    async fn list_fixtures(&self, filter: &FixtureFilter) -> StoreResult<Vec<Fixture>> {
        self.inner.list_fixtures(filter).await
    }

    async fn list_fixtures_with_unscored_predictions(&self) -> StoreResult<Vec<Fixture>> {
        self.inner.list_fixtures_with_unscored_predictions().await
    }

    async fn set_outcome(&self, id: Uuid, outcome: Option<Outcome>) -> StoreResult<Fixture> {
        self.inner.set_outcome(id, outcome).await
    }

    async fn delete_fixture(&self, id: Uuid) -> StoreResult<()> {
        self.inner.delete_fixture(id).await
    }
}

#[async_trait]
impl PlayerStore for FaultyStore {
    async fn insert_player(&self, profile: &PlayerProfile) -> StoreResult<Player> {
        self.inner.insert_player(profile).await
    }

    async fn get_player(&self, id: Uuid) -> StoreResult<Option<Player>> {
        self.inner.get_player(id).await
    }

    async fn get_player_by_username(&self, username: &str) -> StoreResult<Option<Player>> {
        self.inner.get_player_by_username(username).await
    }

    async fn list_players(&self) -> StoreResult<Vec<Player>> {
        self.inner.list_players().await
    }

    async fn update_profile(&self, id: Uuid, profile: &PlayerProfile) -> StoreResult<Player> {
        self.inner.update_profile(id, profile).await
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> StoreResult<Player> {
        self.inner.set_suspended(id, suspended).await
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> StoreResult<Player> {
        self.inner.set_admin(id, is_admin).await
    }
}

#[async_trait]
impl PredictionStore for FaultyStore {
    async fn find_predictions(&self, filter: &PairFilter) -> StoreResult<Vec<Prediction>> {
        self.inner.find_predictions(filter).await
    }

    async fn insert_prediction(&self, new: &NewPrediction) -> StoreResult<Prediction> {
        self.inner.insert_prediction(new).await
    }

    async fn update_prediction(
        &self,
        player_id: Uuid,
        fixture_id: Uuid,
        outcome: Outcome,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Prediction> {
        self.inner
            .update_prediction(player_id, fixture_id, outcome, submitted_at)
            .await
    }
}

#[async_trait]
impl AwardStore for FaultyStore {
    async fn find_awards(&self, filter: &PairFilter) -> StoreResult<Vec<Award>> {
        if self.stale_awards {
            return Ok(Vec::new());
        }
        self.inner.find_awards(filter).await
    }

    async fn insert_award(&self, new: &NewAward) -> StoreResult<Award> {
        self.inner.insert_award(new).await
    }
}

#[async_trait]
impl Store for FaultyStore {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_scoring_creates_one_award_per_pair() {
    const PLAYERS: usize = 20;

    let store = memory_store();
    let fixture = seed_fixture(store.as_ref(), "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    for i in 0..PLAYERS {
        let p = seed_player(store.as_ref(), &format!("player_{i:02}")).await;
        let pick = if i % 2 == 0 { Outcome::HomeWin } else { Outcome::Draw };
        engine::submit_prediction(store.as_ref(), p.id, fixture.id, pick, at(2025, 5, 9, 10, 0, 0))
            .await
            .unwrap();
    }
    engine::resolve_outcome(store.as_ref(), fixture.id, Some(Outcome::HomeWin))
        .await
        .unwrap();

    let now = at(2025, 5, 10, 18, 0, 0);
    let fixture_id = fixture.id;
    let (s1, s2) = (store.clone(), store.clone());
    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { engine::score_fixture(s1.as_ref(), fixture_id, now).await }),
        tokio::spawn(async move { engine::score_fixture(s2.as_ref(), fixture_id, now).await }),
    );
    let r1 = r1.unwrap().unwrap();
    let r2 = r2.unwrap().unwrap();

    assert_eq!(r1.awards_created.len() + r2.awards_created.len(), PLAYERS);
    assert_eq!(
        r1.awards_created.len() + r1.already_scored + r2.awards_created.len() + r2.already_scored,
        2 * PLAYERS
    );

    let awards = store
        .find_awards(&PairFilter::for_fixture(fixture.id))
        .await
        .unwrap();
    assert_eq!(awards.len(), PLAYERS);
    assert_eq!(awards.iter().map(|a| a.points_earned).sum::<u32>(), 3 * (PLAYERS as u32) / 2);
}

#[tokio::test]
async fn test_duplicate_award_insert_counts_as_scored() {
    let mut store = FaultyStore::new();
    let fixture = seed_fixture(&store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let a = seed_player(&store, "footie_fanatic").await;
    let b = seed_player(&store, "soccer_sage").await;
    for p in [&a, &b] {
        engine::submit_prediction(&store, p.id, fixture.id, Outcome::AwayWin, at(2025, 5, 9, 10, 0, 0))
            .await
            .unwrap();
    }
    engine::resolve_outcome(&store, fixture.id, Some(Outcome::AwayWin))
        .await
        .unwrap();
    engine::score_fixture(&store, fixture.id, at(2025, 5, 10, 18, 0, 0))
        .await
        .unwrap();

    // The existing awards are invisible, so every insert hits the uniqueness constraint
    store.stale_awards = true;
    let rerun = engine::score_fixture(&store, fixture.id, at(2025, 5, 11, 9, 0, 0))
        .await
        .unwrap();

    assert!(rerun.awards_created.is_empty());
    assert_eq!(rerun.already_scored, 2);
    assert_eq!(store.inner.find_awards(&PairFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_bulk_scoring_reports_failed_fixture_and_continues() {
    let mut store = FaultyStore::new();
    let f1 = seed_fixture(&store, "Arsenal", "Chelsea", at(2025, 5, 10, 15, 0, 0)).await;
    let f2 = seed_fixture(&store, "Liverpool", "Everton", at(2025, 5, 11, 16, 30, 0)).await;
    let a = seed_player(&store, "footie_fanatic").await;
    for f in [&f1, &f2] {
        engine::submit_prediction(&store, a.id, f.id, Outcome::HomeWin, at(2025, 5, 9, 10, 0, 0))
            .await
            .unwrap();
        engine::resolve_outcome(&store, f.id, Some(Outcome::HomeWin))
            .await
            .unwrap();
    }

    store.broken_fixture = Some(f1.id);
    let report = engine::score_outstanding(&store, at(2025, 5, 12, 9, 0, 0), 2)
        .await
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].fixture_id, f1.id);
    assert_eq!(report.failed[0].reason, "store");
    assert_eq!(report.scored.len(), 1);
    assert_eq!(report.scored[0].fixture_id, f2.id);
    assert_eq!(report.awards_created(), 1);
    assert!(report.skipped.is_empty());

    let f1_awards = store.inner.find_awards(&PairFilter::for_fixture(f1.id)).await.unwrap();
    assert!(f1_awards.is_empty());
}
