// Public API
pub use handlers::{create_game, list_games};
pub use service::GameService;

mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
