//! Strict JSON request body extractor.
//!
//! Unlike `axum::Json`, every decoding failure is reported as a 400 with a
//! message naming what was wrong with the body, and trailing values after the
//! first JSON document are rejected.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::shared::AppError;

/// Upper bound on accepted request bodies
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// JSON body extractor. Request types should use `#[serde(deny_unknown_fields)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = buffer_body(req, state).await?;
        decode_json_body(&bytes).map(JsonBody)
    }
}

/// Undecoded request body, for handlers that must run checks before decoding.
/// Buffering failures get the same error responses as [`JsonBody`].
#[derive(Debug, Clone, Default)]
pub struct RawBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        buffer_body(req, state).await.map(RawBody)
    }
}

async fn buffer_body<S: Send + Sync>(req: Request, state: &S) -> Result<Bytes, AppError> {
    Bytes::from_request(req, state).await.map_err(|rejection| {
        debug!(error = %rejection, "Failed to buffer request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Request body must not be larger than 1MB".to_string())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })
}

/// Decodes exactly one JSON document from `bytes` into `T`
pub fn decode_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.len() > MAX_BODY_BYTES {
        return Err(AppError::PayloadTooLarge(
            "Request body must not be larger than 1MB".to_string(),
        ));
    }

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(AppError::BadRequest(
            "Request body must not be empty".to_string(),
        ));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut deserializer).map_err(describe_error)?;

    deserializer.end().map_err(|_| {
        AppError::BadRequest("Request body must only contain a single JSON object".to_string())
    })?;

    Ok(value)
}

fn describe_error(error: serde_json::Error) -> AppError {
    debug!(error = %error, "Rejected request body");

    let message = match error.classify() {
        Category::Syntax | Category::Eof => format!(
            "Request body contains badly-formed JSON (at line {}, column {})",
            error.line(),
            error.column()
        ),
        Category::Data => {
            let text = error.to_string();
            if let Some(field) = unknown_field_name(&text) {
                format!("Request body contains unknown key \"{}\"", field)
            } else if text.starts_with("invalid type") {
                format!(
                    "Request body contains incorrect JSON type (at line {}, column {})",
                    error.line(),
                    error.column()
                )
            } else {
                format!("Request body is invalid: {}", text)
            }
        }
        Category::Io => "Bad Request".to_string(),
    };

    AppError::BadRequest(message)
}

// serde reports unknown fields as "unknown field `name`, expected ..."
fn unknown_field_name(message: &str) -> Option<&str> {
    message
        .strip_prefix("unknown field `")
        .and_then(|rest| rest.split('`').next())
}
