use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for the scores table. One row per (player, game) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreModel {
    pub id: i64,
    pub player_id: Uuid,
    pub game_id: i64,
    pub value: i64,
    pub created_at: DateTime<Utc>,
}

/// A score joined with the display name of the player who owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub username: String,
    pub value: i64,
}

impl PlayerScore {
    pub fn new(username: impl Into<String>, value: i64) -> Self {
        Self {
            username: username.into(),
            value,
        }
    }
}
