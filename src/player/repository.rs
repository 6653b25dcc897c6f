use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{PlayerModel, Role};
use crate::shared::{map_database_error, AppError};

const DUPLICATE_PLAYER: &str = "User already exists";

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository {
    /// Fails with `AppError::Conflict` when the username or email is taken
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError>;
    async fn find_player_by_username(&self, username: &str)
        -> Result<Option<PlayerModel>, AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<Uuid, PlayerModel>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of players in the repository
    pub fn player_count(&self) -> usize {
        self.players.lock().unwrap().len()
    }

    /// Looks up a display name by player id (used to join score rows in memory)
    pub fn username_of(&self, player_id: &Uuid) -> Option<String> {
        self.players
            .lock()
            .unwrap()
            .get(player_id)
            .map(|player| player.username.clone())
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, username = %player.username, "Creating player in memory");

        let mut players = self.players.lock().unwrap();
        let taken = players.values().any(|existing| {
            existing.id == player.id
                || existing.username == player.username
                || existing.email == player.email
        });
        if taken {
            warn!(username = %player.username, "Player already exists in memory");
            return Err(AppError::Conflict(DUPLICATE_PLAYER.to_string()));
        }
        players.insert(player.id, player.clone());

        debug!(player_id = %player.id, "Player created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_player_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        debug!(username = %username, "Fetching player from memory");

        let players = self.players.lock().unwrap();
        let player = players
            .values()
            .find(|player| player.username == username)
            .cloned();

        if player.is_none() {
            debug!(username = %username, "Player not found in memory");
        }

        Ok(player)
    }
}

/// PostgreSQL implementation of player repository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &PlayerModel) -> Result<(), AppError> {
        debug!(player_id = %player.id, username = %player.username, "Creating player in database");

        sqlx::query(
            "INSERT INTO players (id, username, email, password_hash, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(player.id)
        .bind(&player.username)
        .bind(&player.email)
        .bind(&player.password_hash)
        .bind(player.role.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create player in database");
            map_database_error(e, DUPLICATE_PLAYER)
        })?;

        debug!(player_id = %player.id, "Player created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_player_by_username(
        &self,
        username: &str,
    ) -> Result<Option<PlayerModel>, AppError> {
        debug!(username = %username, "Fetching player from database");

        let row = sqlx::query(
            "SELECT id, username, email, password_hash, role FROM players WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, username = %username, "Failed to fetch player from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let Some(row) = row else {
            debug!(username = %username, "Player not found in database");
            return Ok(None);
        };

        let role: String = row.get("role");
        let role = Role::from_str(&role).map_err(|_| {
            warn!(role = %role, "Unknown role stored for player");
            AppError::DatabaseError(format!("Unknown role '{}'", role))
        })?;

        Ok(Some(PlayerModel {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role,
        }))
    }
}
