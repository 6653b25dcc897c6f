use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth, game, json_body::MAX_BODY_BYTES, player, score, shared::AppState, telemetry};

/// Builds the full HTTP API.
///
/// Joining a game, submitting scores and adding games require a bearer token;
/// everything else is public.
pub fn app(state: AppState) -> Router {
    let require_token = middleware::from_fn_with_state(state.clone(), auth::jwt_auth);

    Router::new()
        .route("/", get(|| async { "Game scores API is running" }))
        .route("/register", post(player::register))
        .route("/login", post(player::login))
        .route(
            "/games",
            post(game::create_game)
                .route_layer(require_token.clone())
                .get(game::list_games),
        )
        .route(
            "/games/:game_id/join",
            post(score::join_game).route_layer(require_token.clone()),
        )
        .route(
            "/games/:game_id/scores",
            put(score::update_score)
                .route_layer(require_token)
                .get(score::list_scores),
        )
        .route("/games/:game_id/statistics", get(score::game_statistics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(telemetry::log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
