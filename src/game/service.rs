use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::GameModel,
    repository::GameRepository,
    types::{AddGameRequest, GameResponse},
};
use crate::{
    auth::Claims,
    player::models::Role,
    shared::AppError,
};

/// Service for the game catalogue
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Lists all games in the catalogue
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<GameResponse>, AppError> {
        let games = self.repository.list_games().await?;
        debug!(game_count = games.len(), "Games retrieved");

        Ok(games.into_iter().map(GameResponse::from).collect())
    }

    /// Checks that the caller may add games. Runs before the body is decoded.
    pub fn authorize_create(&self, claims: &Claims) -> Result<(), AppError> {
        claims.require_role(Role::Admin)
    }

    /// Adds a game after validating its name
    #[instrument(skip(self, request), fields(game_name = %request.name))]
    pub async fn create_game(&self, request: AddGameRequest) -> Result<GameModel, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Game name cannot be empty".to_string(),
            ));
        }

        let game = self
            .repository
            .create_game(&request.name, &request.description)
            .await?;

        info!(game_id = game.id, game_name = %game.name, "Game added successfully");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::repository::InMemoryGameRepository;
    use crate::player::models::PlayerModel;
    use crate::shared::test_utils::claims_for;

    fn service() -> GameService {
        GameService::new(Arc::new(InMemoryGameRepository::new()))
    }

    fn claims(role: Role) -> Claims {
        claims_for(&PlayerModel::new(
            "someone".to_string(),
            "someone@example.com".to_string(),
            "hash".to_string(),
            role,
        ))
    }

    fn request(name: &str) -> AddGameRequest {
        AddGameRequest {
            name: name.to_string(),
            description: "A classic".to_string(),
        }
    }

    #[test]
    fn test_only_admins_may_create() {
        let service = service();
        assert!(service.authorize_create(&claims(Role::Admin)).is_ok());
        assert!(matches!(
            service.authorize_create(&claims(Role::Player)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = service();

        let game = service.create_game(request("Tetris")).await.unwrap();
        assert_eq!(game.name, "Tetris");

        let games = service.list_games().await.unwrap();
        assert_eq!(
            games,
            vec![GameResponse {
                id: game.id,
                name: "Tetris".to_string(),
                description: "A classic".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let service = service();

        for name in ["", "   "] {
            let result = service.create_game(request(name)).await;
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }
        assert!(service.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = service();
        service.create_game(request("Tetris")).await.unwrap();

        let result = service.create_game(request("Tetris")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
