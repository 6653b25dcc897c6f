use axum::Router;
use std::sync::Arc;

use game_scores::{
    app,
    auth::TokenConfig,
    player::service::PlayerService,
    AppState, InMemoryGameRepository, InMemoryPlayerRepository, InMemoryScoreRepository,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const DEFAULT_PASSWORD: &str = "password123";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A full API router backed by fresh in-memory repositories
pub struct TestSetup {
    pub app: Router,
    #[allow(dead_code)]
    pub state: AppState,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    games: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            games: vec![],
        }
    }

    /// Players registered through the API with `DEFAULT_PASSWORD`
    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// Games added through the API by the admin account, in order
    pub fn with_games(mut self, games: Vec<&str>) -> Self {
        self.games = games.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub async fn build(self) -> TestSetup {
        let players = Arc::new(InMemoryPlayerRepository::new());
        let state = AppState::new(
            players.clone(),
            Arc::new(InMemoryGameRepository::new()),
            Arc::new(InMemoryScoreRepository::new(players)),
            TokenConfig::new("integration-test-secret", 24),
        );

        PlayerService::new(
            Arc::clone(&state.player_repository),
            state.token_config.clone(),
        )
        .ensure_admin(ADMIN_USERNAME, "admin@example.com", ADMIN_PASSWORD)
        .await
        .unwrap();

        let setup = TestSetup {
            app: app(state.clone()),
            state,
        };

        for player in &self.players {
            setup
                .register(player, DEFAULT_PASSWORD)
                .await
                .assert_status(201);
        }

        if !self.games.is_empty() {
            let admin_token = setup.admin_token().await;
            for game in &self.games {
                setup
                    .create_game(&admin_token, game, "")
                    .await
                    .assert_status(201);
            }
        }

        setup
    }
}

impl TestSetup {
    /// Logs in as the seeded admin
    pub async fn admin_token(&self) -> String {
        self.login_token(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Logs in a player registered with `DEFAULT_PASSWORD`
    pub async fn token_for(&self, username: &str) -> String {
        self.login_token(username, DEFAULT_PASSWORD).await
    }
}
