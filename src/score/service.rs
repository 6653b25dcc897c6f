use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    leaderboard,
    models::ScoreModel,
    repository::ScoreRepository,
    statistics::ScoreStatistics,
    types::{LeaderboardEntry, StatisticsResponse},
    validator,
};
use crate::{game::repository::GameRepository, shared::AppError};

/// Service for joining games and tracking scores
pub struct ScoreService {
    games: Arc<dyn GameRepository + Send + Sync>,
    scores: Arc<dyn ScoreRepository + Send + Sync>,
}

impl ScoreService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        scores: Arc<dyn ScoreRepository + Send + Sync>,
    ) -> Self {
        Self { games, scores }
    }

    async fn ensure_game_exists(&self, game_id: i64) -> Result<(), AppError> {
        if !self.games.game_exists(game_id).await? {
            debug!(game_id, "Game not found");
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        Ok(())
    }

    /// Registers the player in a game with a starting score of zero
    #[instrument(skip(self), fields(player_id = %player_id))]
    pub async fn join_game(&self, player_id: Uuid, game_id: i64) -> Result<ScoreModel, AppError> {
        self.ensure_game_exists(game_id).await?;

        if self
            .scores
            .find_score_by_player_and_game(player_id, game_id)
            .await?
            .is_some()
        {
            warn!(game_id, "Player already joined game");
            return Err(AppError::Conflict(
                "User has already joined this game".to_string(),
            ));
        }

        // A concurrent join that slips past the check above hits the unique constraint instead
        let score = self.scores.create_score(player_id, game_id).await?;
        info!(game_id, score_id = score.id, "Player joined game");
        Ok(score)
    }

    /// Replaces the player's score with `raw` if it does not go below the stored value
    #[instrument(skip(self), fields(player_id = %player_id))]
    pub async fn update_score(
        &self,
        player_id: Uuid,
        game_id: i64,
        raw: &str,
    ) -> Result<i64, AppError> {
        let current = self
            .scores
            .find_score_by_player_and_game(player_id, game_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Score not found, player must join the game first.".to_string())
            })?;

        let proposed = validator::parse_score(raw)?;
        let accepted = validator::validate_update(current.value, proposed).map_err(|e| {
            warn!(game_id, current = current.value, proposed, "Score regression rejected");
            e
        })?;

        let updated = self.scores.update_score_value(current.id, accepted).await?;
        info!(game_id, score = updated.value, "Score updated");
        Ok(updated.value)
    }

    /// Ranked scores for a game, highest first
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, game_id: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.ensure_game_exists(game_id).await?;

        let scores = self.scores.list_scores_by_game(game_id).await?;
        debug!(game_id, score_count = scores.len(), "Scores retrieved");
        Ok(leaderboard::rank(scores))
    }

    /// Mean, median and mode over a game's scores
    #[instrument(skip(self))]
    pub async fn statistics(&self, game_id: i64) -> Result<StatisticsResponse, AppError> {
        self.ensure_game_exists(game_id).await?;

        let values: Vec<i64> = self
            .scores
            .list_scores_by_game(game_id)
            .await?
            .into_iter()
            .map(|score| score.value)
            .collect();

        let stats = ScoreStatistics::from_scores(&values);
        debug!(game_id, mean = stats.mean, median = stats.median, "Statistics computed");
        Ok(stats.into())
    }
}
