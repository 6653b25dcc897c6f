use serde::{Deserialize, Serialize};

use super::models::GameModel;

/// Request payload for adding a game to the catalogue
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddGameRequest {
    #[serde(rename = "game_name", default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Response entry for the game listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GameResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<GameModel> for GameResponse {
    fn from(game: GameModel) -> Self {
        Self {
            id: game.id,
            name: game.name,
            description: game.description,
        }
    }
}
