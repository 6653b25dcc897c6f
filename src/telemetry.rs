use axum::{
    extract::{MatchedPath, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// Request logging middleware.
/// Usage: .layer(middleware::from_fn(telemetry::log_requests))
///
/// Routes are logged by their pattern (`/games/:game_id/scores`) rather than the raw URI.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        warn!(%method, route = %route, status = status.as_u16(), latency_ms, user_agent = %user_agent, "Request failed");
    } else {
        info!(%method, route = %route, status = status.as_u16(), latency_ms, user_agent = %user_agent, "Request handled");
    }

    response
}
