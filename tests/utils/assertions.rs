//! Test assertion helpers - fluent API for verifying API responses
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::http::StatusCode;
use serde_json::Value;

// ============================================================================
// Assertion Helpers
// ============================================================================

/// A buffered API response. Bodies that are not JSON are kept as a JSON string.
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Assert the HTTP status code
    pub fn assert_status(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status.as_u16(),
            expected,
            "unexpected status, body: {}",
            self.body
        );
        self
    }

    /// Assert the whole JSON body
    pub fn assert_json(&self, expected: Value) -> &Self {
        assert_eq!(self.body, expected);
        self
    }

    /// Assert an `{"error": ...}` body with the given message
    pub fn assert_error(&self, expected_status: u16, message: &str) -> &Self {
        self.assert_status(expected_status);
        assert_eq!(self.body["error"], message, "unexpected error body");
        self
    }

    /// Leaderboard rows as (username, score) pairs
    pub fn leaderboard(&self) -> Vec<(String, String)> {
        self.body
            .as_array()
            .expect("leaderboard body should be an array")
            .iter()
            .map(|entry| {
                (
                    entry["username"].as_str().unwrap().to_string(),
                    entry["score"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }
}
