use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::EngineError;
use crate::models::{Award, PairFilter, Player, CORRECT_OUTCOME_POINTS};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub player_id: Uuid,
    pub username: String,
    pub club_supported: String,
    pub total_points: u32,
    pub correct_predictions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub player_id: Uuid,
    pub total_points: u32,
    pub predictions: usize,
    pub correct_predictions: usize,
}

/// Rank players by total points, ties broken by username. Positions start at 1.
pub fn build_leaderboard(players: &[Player], awards: &[Award]) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<Uuid, (u32, usize)> = HashMap::new();
    for award in awards {
        let entry = totals.entry(award.player_id).or_default();
        entry.0 += award.points_earned;
        if award.points_earned == CORRECT_OUTCOME_POINTS {
            entry.1 += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .map(|p| {
            let (total_points, correct_predictions) =
                totals.get(&p.id).copied().unwrap_or_default();
            LeaderboardEntry {
                position: 0,
                player_id: p.id,
                username: p.username.clone(),
                club_supported: p.club_supported.clone(),
                total_points,
                correct_predictions,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.username.to_lowercase().cmp(&b.username.to_lowercase()))
    });

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }

    entries
}

pub async fn leaderboard(store: &dyn Store) -> Result<Vec<LeaderboardEntry>, EngineError> {
    let players = store.list_players().await?;
    let awards = store.find_awards(&PairFilter::default()).await?;
    Ok(build_leaderboard(&players, &awards))
}

pub async fn player_stats(store: &dyn Store, player_id: Uuid) -> Result<PlayerStats, EngineError> {
    if store.get_player(player_id).await?.is_none() {
        return Err(EngineError::NotFound(format!("player {player_id}")));
    }

    let filter = PairFilter::for_player(player_id);
    let predictions = store.find_predictions(&filter).await?;
    let awards = store.find_awards(&filter).await?;

    Ok(PlayerStats {
        player_id,
        total_points: awards.iter().map(|a| a.points_earned).sum(),
        predictions: predictions.len(),
        correct_predictions: awards
            .iter()
            .filter(|a| a.points_earned == CORRECT_OUTCOME_POINTS)
            .count(),
    })
}
