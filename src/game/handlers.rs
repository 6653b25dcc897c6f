use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::GameService,
    types::{AddGameRequest, GameResponse},
};
use crate::auth::Claims;
use crate::json_body::{decode_json_body, RawBody};
use crate::shared::{AppError, AppState, MessageResponse};

/// HTTP handler for listing the game catalogue
///
/// GET /games
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    let games = service.list_games().await?;

    info!(game_count = games.len(), "Games listed successfully");

    Ok(Json(games))
}

/// HTTP handler for adding a game (admin only)
///
/// POST /games
/// The role check runs before the body is decoded, so players get 403 regardless of payload.
#[instrument(name = "create_game", skip(state, claims, body), fields(username = %claims.username))]
pub async fn create_game(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    RawBody(body): RawBody,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    service.authorize_create(&claims)?;

    let request: AddGameRequest = decode_json_body(&body)?;
    service.create_game(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Game added successfully")),
    ))
}
