use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::ScoreService,
    types::{JoinGameResponse, LeaderboardEntry, ScoreResponse, StatisticsResponse, UpdateScoreRequest},
};
use crate::auth::Claims;
use crate::json_body::{decode_json_body, RawBody};
use crate::shared::{parse_game_id, AppError, AppState};

fn score_service(state: &AppState) -> ScoreService {
    ScoreService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.score_repository),
    )
}

/// HTTP handler for joining a game
///
/// POST /games/:game_id/join
#[instrument(name = "join_game", skip(state, claims), fields(username = %claims.username))]
pub async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<JoinGameResponse>), AppError> {
    let game_id = parse_game_id(&game_id)?;
    let score = score_service(&state)
        .join_game(claims.user_id, game_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinGameResponse {
            message: "Successfully joined game".to_string(),
            score: score.value,
        }),
    ))
}

/// HTTP handler for submitting a new score
///
/// PUT /games/:game_id/scores
/// The game id is validated before the body is decoded.
#[instrument(name = "update_score", skip(state, claims, body), fields(username = %claims.username))]
pub async fn update_score(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Extension(claims): Extension<Claims>,
    RawBody(body): RawBody,
) -> Result<Json<ScoreResponse>, AppError> {
    let game_id = parse_game_id(&game_id)?;
    let request: UpdateScoreRequest = decode_json_body(&body)?;

    let score = score_service(&state)
        .update_score(claims.user_id, game_id, &request.score)
        .await?;

    Ok(Json(ScoreResponse { score }))
}

/// HTTP handler for a game's leaderboard
///
/// GET /games/:game_id/scores
#[instrument(name = "list_scores", skip(state))]
pub async fn list_scores(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let game_id = parse_game_id(&game_id)?;
    let entries = score_service(&state).leaderboard(game_id).await?;

    info!(game_id, entry_count = entries.len(), "Leaderboard served");
    Ok(Json(entries))
}

/// HTTP handler for a game's score statistics
///
/// GET /games/:game_id/statistics
#[instrument(name = "game_statistics", skip(state))]
pub async fn game_statistics(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<StatisticsResponse>, AppError> {
    let game_id = parse_game_id(&game_id)?;
    let stats = score_service(&state).statistics(game_id).await?;

    Ok(Json(stats))
}
