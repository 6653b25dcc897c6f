use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::GameModel;
use crate::shared::{map_database_error, AppError};

const DUPLICATE_GAME: &str = "Game with this name already exists";

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository {
    /// Stores a new game and returns it with its assigned id.
    /// Fails with `AppError::Conflict` when the name is taken.
    async fn create_game(&self, name: &str, description: &str) -> Result<GameModel, AppError>;
    async fn find_game_by_id(&self, game_id: i64) -> Result<Option<GameModel>, AppError>;
    async fn game_exists(&self, game_id: i64) -> Result<bool, AppError>;
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError>;
}

struct GameTable {
    next_id: i64,
    games: BTreeMap<i64, GameModel>,
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    table: Mutex<GameTable>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    /// Creates a new empty in-memory repository. Ids start at 1.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(GameTable {
                next_id: 1,
                games: BTreeMap::new(),
            }),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, description))]
    async fn create_game(&self, name: &str, description: &str) -> Result<GameModel, AppError> {
        debug!("Creating game in memory");

        let mut table = self.table.lock().unwrap();
        if table.games.values().any(|game| game.name == name) {
            warn!("Game already exists in memory");
            return Err(AppError::Conflict(DUPLICATE_GAME.to_string()));
        }

        let game = GameModel {
            id: table.next_id,
            name: name.to_string(),
            description: description.to_string(),
        };
        table.next_id += 1;
        table.games.insert(game.id, game.clone());

        debug!(game_id = game.id, "Game created successfully in memory");
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn find_game_by_id(&self, game_id: i64) -> Result<Option<GameModel>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table.games.get(&game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn game_exists(&self, game_id: i64) -> Result<bool, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table.games.contains_key(&game_id))
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table.games.values().cloned().collect())
    }
}

/// PostgreSQL implementation of game repository
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn game_from_row(row: &sqlx::postgres::PgRow) -> GameModel {
    GameModel {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    #[instrument(skip(self, description))]
    async fn create_game(&self, name: &str, description: &str) -> Result<GameModel, AppError> {
        debug!("Creating game in database");

        let row = sqlx::query(
            "INSERT INTO games (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create game in database");
            map_database_error(e, DUPLICATE_GAME)
        })?;

        let game = game_from_row(&row);
        debug!(game_id = game.id, "Game created successfully in database");
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn find_game_by_id(&self, game_id: i64) -> Result<Option<GameModel>, AppError> {
        let row = sqlx::query("SELECT id, name, description FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id, "Failed to fetch game from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(row.as_ref().map(game_from_row))
    }

    #[instrument(skip(self))]
    async fn game_exists(&self, game_id: i64) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM games WHERE id = $1)")
            .bind(game_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id, "Failed to check for game in database");
                AppError::DatabaseError(e.to_string())
            })
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        let rows = sqlx::query("SELECT id, name, description FROM games ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list games from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(rows.iter().map(game_from_row).collect())
    }
}
