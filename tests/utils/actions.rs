use axum::{
    body::Body,
    http::{Method, Request},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::{assertions::ApiResponse, setup::TestSetup};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the router and buffer the response
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        ApiResponse { status, body }
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn register(&self, username: &str, password: &str) -> ApiResponse {
        let body = json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
        });
        self.send(Method::POST, "/register", None, Some(body.to_string()))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResponse {
        let body = json!({"username": username, "password": password});
        self.send(Method::POST, "/login", None, Some(body.to_string()))
            .await
    }

    /// Log in and return the bearer token, failing the test on any error
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        response.assert_status(200);
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_game(&self, token: &str, name: &str, description: &str) -> ApiResponse {
        let body = json!({"game_name": name, "description": description});
        self.send(Method::POST, "/games", Some(token), Some(body.to_string()))
            .await
    }

    pub async fn list_games(&self) -> ApiResponse {
        self.send(Method::GET, "/games", None, None).await
    }

    pub async fn join_game(&self, token: &str, game_id: &str) -> ApiResponse {
        let uri = format!("/games/{}/join", game_id);
        self.send(Method::POST, &uri, Some(token), None).await
    }

    /// Submit a score as the decimal string the API expects
    pub async fn submit_score(&self, token: &str, game_id: &str, score: &str) -> ApiResponse {
        let uri = format!("/games/{}/scores", game_id);
        let body = json!({"score": score});
        self.send(Method::PUT, &uri, Some(token), Some(body.to_string()))
            .await
    }

    pub async fn leaderboard(&self, game_id: &str) -> ApiResponse {
        let uri = format!("/games/{}/scores", game_id);
        self.send(Method::GET, &uri, None, None).await
    }

    pub async fn statistics(&self, game_id: &str) -> ApiResponse {
        let uri = format!("/games/{}/statistics", game_id);
        self.send(Method::GET, &uri, None, None).await
    }

    /// Join a game and submit each score in turn, asserting every step succeeds
    pub async fn play(&self, username: &str, game_id: &str, scores: &[&str]) {
        let token = self.token_for(username).await;
        self.join_game(&token, game_id).await.assert_status(201);
        for score in scores {
            self.submit_score(&token, game_id, score)
                .await
                .assert_status(200);
        }
    }
}
