use serde::{Deserialize, Serialize};

/// Database model for the games table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameModel {
    pub id: i64,
    pub name: String,
    /// Empty when the game was created without a description
    pub description: String,
}
