use super::{models::PlayerScore, types::LeaderboardEntry};

/// Orders scores highest first. The sort is stable, so tied scores keep the order they were fetched in.
pub fn rank(mut scores: Vec<PlayerScore>) -> Vec<LeaderboardEntry> {
    scores.sort_by(|a, b| b.value.cmp(&a.value));
    scores.into_iter().map(LeaderboardEntry::from).collect()
}
