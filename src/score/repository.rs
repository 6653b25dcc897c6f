use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{PlayerScore, ScoreModel};
use crate::player::repository::InMemoryPlayerRepository;
use crate::shared::{map_database_error, AppError};

const ALREADY_JOINED: &str = "User has already joined this game";
const UNKNOWN_PLAYER: &str = "Player not found";

/// Trait for score repository operations
#[async_trait]
pub trait ScoreRepository {
    async fn find_score_by_player_and_game(
        &self,
        player_id: Uuid,
        game_id: i64,
    ) -> Result<Option<ScoreModel>, AppError>;

    /// Inserts a zero score for the pair. Fails with `AppError::Conflict` if the pair exists
    /// and `AppError::NotFound` if the player does not.
    async fn create_score(&self, player_id: Uuid, game_id: i64) -> Result<ScoreModel, AppError>;

    /// Overwrites the stored value of an existing score row
    async fn update_score_value(&self, score_id: i64, value: i64)
        -> Result<ScoreModel, AppError>;

    /// All scores of a game with their owners' usernames, highest first
    async fn list_scores_by_game(&self, game_id: i64) -> Result<Vec<PlayerScore>, AppError>;
}

struct ScoreTable {
    next_id: i64,
    scores: Vec<ScoreModel>,
}

/// In-memory implementation of ScoreRepository for development and testing.
///
/// Usernames for the leaderboard are resolved against the player repository it was built with.
pub struct InMemoryScoreRepository {
    players: Arc<InMemoryPlayerRepository>,
    table: Mutex<ScoreTable>,
}

impl InMemoryScoreRepository {
    pub fn new(players: Arc<InMemoryPlayerRepository>) -> Self {
        Self {
            players,
            table: Mutex::new(ScoreTable {
                next_id: 1,
                scores: Vec::new(),
            }),
        }
    }

    /// Returns the current number of score rows
    pub fn score_count(&self) -> usize {
        self.table.lock().unwrap().scores.len()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    #[instrument(skip(self))]
    async fn find_score_by_player_and_game(
        &self,
        player_id: Uuid,
        game_id: i64,
    ) -> Result<Option<ScoreModel>, AppError> {
        let table = self.table.lock().unwrap();
        Ok(table
            .scores
            .iter()
            .find(|score| score.player_id == player_id && score.game_id == game_id)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn create_score(&self, player_id: Uuid, game_id: i64) -> Result<ScoreModel, AppError> {
        debug!("Creating score in memory");

        if self.players.username_of(&player_id).is_none() {
            warn!(player_id = %player_id, "Refusing score for unknown player");
            return Err(AppError::NotFound(UNKNOWN_PLAYER.to_string()));
        }

        let mut table = self.table.lock().unwrap();
        if table
            .scores
            .iter()
            .any(|score| score.player_id == player_id && score.game_id == game_id)
        {
            warn!("Score already exists in memory");
            return Err(AppError::Conflict(ALREADY_JOINED.to_string()));
        }

        let score = ScoreModel {
            id: table.next_id,
            player_id,
            game_id,
            value: 0,
            created_at: Utc::now(),
        };
        table.next_id += 1;
        table.scores.push(score.clone());

        debug!(score_id = score.id, "Score created successfully in memory");
        Ok(score)
    }

    #[instrument(skip(self))]
    async fn update_score_value(
        &self,
        score_id: i64,
        value: i64,
    ) -> Result<ScoreModel, AppError> {
        let mut table = self.table.lock().unwrap();
        let score = table
            .scores
            .iter_mut()
            .find(|score| score.id == score_id)
            .ok_or_else(|| AppError::NotFound("Score not found".to_string()))?;

        score.value = value;
        debug!(score_id, value, "Score updated in memory");
        Ok(score.clone())
    }

    #[instrument(skip(self))]
    async fn list_scores_by_game(&self, game_id: i64) -> Result<Vec<PlayerScore>, AppError> {
        let table = self.table.lock().unwrap();
        let mut scores: Vec<PlayerScore> = table
            .scores
            .iter()
            .filter(|score| score.game_id == game_id)
            .filter_map(|score| match self.players.username_of(&score.player_id) {
                Some(username) => Some(PlayerScore::new(username, score.value)),
                None => {
                    warn!(score_id = score.id, player_id = %score.player_id, "Skipping score of unknown player");
                    None
                }
            })
            .collect();

        scores.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(scores)
    }
}

/// PostgreSQL implementation of score repository
pub struct PostgresScoreRepository {
    pool: PgPool,
}

impl PostgresScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn score_from_row(row: &sqlx::postgres::PgRow) -> ScoreModel {
    ScoreModel {
        id: row.get("id"),
        player_id: row.get("player_id"),
        game_id: row.get("game_id"),
        value: row.get("value"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ScoreRepository for PostgresScoreRepository {
    #[instrument(skip(self))]
    async fn find_score_by_player_and_game(
        &self,
        player_id: Uuid,
        game_id: i64,
    ) -> Result<Option<ScoreModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, player_id, game_id, value, created_at FROM scores WHERE player_id = $1 AND game_id = $2",
        )
        .bind(player_id)
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch score from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.as_ref().map(score_from_row))
    }

    #[instrument(skip(self))]
    async fn create_score(&self, player_id: Uuid, game_id: i64) -> Result<ScoreModel, AppError> {
        debug!("Creating score in database");

        let row = sqlx::query(
            "INSERT INTO scores (player_id, game_id, value) VALUES ($1, $2, 0) \
             RETURNING id, player_id, game_id, value, created_at",
        )
        .bind(player_id)
        .bind(game_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create score in database");
            let missing_player = e
                .as_database_error()
                .map(|db_error| db_error.is_foreign_key_violation())
                .unwrap_or(false);
            if missing_player {
                AppError::NotFound(UNKNOWN_PLAYER.to_string())
            } else {
                map_database_error(e, ALREADY_JOINED)
            }
        })?;

        let score = score_from_row(&row);
        debug!(score_id = score.id, "Score created successfully in database");
        Ok(score)
    }

    #[instrument(skip(self))]
    async fn update_score_value(
        &self,
        score_id: i64,
        value: i64,
    ) -> Result<ScoreModel, AppError> {
        // TODO: make this conditional on the previous value so concurrent submissions cannot lower a score
        let row = sqlx::query(
            "UPDATE scores SET value = $1 WHERE id = $2 \
             RETURNING id, player_id, game_id, value, created_at",
        )
        .bind(value)
        .bind(score_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, score_id, "Failed to update score in database");
            AppError::DatabaseError(e.to_string())
        })?;

        let row = row.ok_or_else(|| AppError::NotFound("Score not found".to_string()))?;
        debug!(score_id, value, "Score updated in database");
        Ok(score_from_row(&row))
    }

    #[instrument(skip(self))]
    async fn list_scores_by_game(&self, game_id: i64) -> Result<Vec<PlayerScore>, AppError> {
        let rows = sqlx::query(
            "SELECT p.username, s.value FROM scores s \
             JOIN players p ON p.id = s.player_id \
             WHERE s.game_id = $1 \
             ORDER BY s.value DESC, s.id",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id, "Failed to list scores from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .iter()
            .map(|row| PlayerScore::new(row.get::<String, _>("username"), row.get("value")))
            .collect())
    }
}
