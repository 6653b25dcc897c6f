// Public API
pub use errors::ScoreError;
pub use handlers::{game_statistics, join_game, list_scores, update_score};
pub use service::ScoreService;
pub use statistics::ScoreStatistics;

pub mod errors;
mod handlers;
pub mod leaderboard;
pub mod models;
pub mod repository;
pub mod service;
pub mod statistics;
pub mod types;
pub mod validator;
