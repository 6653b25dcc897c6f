// Library crate for the game scores API
// This file exposes the public API for the binaries and integration tests

pub mod auth;
pub mod config;
pub mod game;
pub mod json_body;
pub mod player;
pub mod router;
pub mod score;
pub mod shared;
pub mod telemetry;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use game::repository::{GameRepository, InMemoryGameRepository, PostgresGameRepository};
pub use player::repository::{InMemoryPlayerRepository, PlayerRepository, PostgresPlayerRepository};
pub use router::app;
pub use score::repository::{InMemoryScoreRepository, PostgresScoreRepository, ScoreRepository};
pub use shared::{AppError, AppState};
