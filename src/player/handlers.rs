use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::PlayerService,
    types::{LoginRequest, LoginResponse, RegisterRequest},
};
use crate::json_body::JsonBody;
use crate::shared::{AppError, AppState, MessageResponse};

/// HTTP handler for registering a new player
///
/// POST /register
#[instrument(name = "register", skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let service = PlayerService::new(
        Arc::clone(&state.player_repository),
        state.token_config.clone(),
    );
    let player = service.register(request).await?;

    info!(username = %player.username, "Player registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// HTTP handler for logging in
///
/// POST /login
/// Returns a bearer token for subsequent authenticated requests
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = PlayerService::new(
        Arc::clone(&state.player_repository),
        state.token_config.clone(),
    );
    let response = service.login(request).await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::Request,
        routing::post,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/register", post(register))
            .route("/login", post(login))
            .with_state(state)
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_and_login_handlers() {
        let state = AppStateBuilder::new().build();

        let response = app(state.clone())
            .oneshot(json_request(
                "/register",
                r#"{"username": "alice", "email": "alice@example.com", "password": "password123"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message: MessageResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(message.message, "User registered successfully");

        let response = app(state.clone())
            .oneshot(json_request(
                "/login",
                r#"{"username": "alice", "password": "password123"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login: LoginResponse = serde_json::from_slice(&body).unwrap();
        let claims = state.token_config.validate_token(&login.token).unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let state = AppStateBuilder::new().build();
        let body = r#"{"username": "alice", "email": "alice@example.com", "password": "password123"}"#;

        let first = app(state.clone())
            .oneshot(json_request("/register", body))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app(state).oneshot(json_request("/register", body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_unknown_field_is_bad_request() {
        let state = AppStateBuilder::new().build();

        let response = app(state)
            .oneshot(json_request(
                "/register",
                r#"{"username": "alice", "email": "a@example.com", "password": "password123", "role": "admin"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let state = AppStateBuilder::new().build();
        app(state.clone())
            .oneshot(json_request(
                "/register",
                r#"{"username": "alice", "email": "alice@example.com", "password": "password123"}"#,
            ))
            .await
            .unwrap();

        let response = app(state)
            .oneshot(json_request(
                "/login",
                r#"{"username": "alice", "password": "wrong-password"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
