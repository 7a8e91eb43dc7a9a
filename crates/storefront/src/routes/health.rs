//! Health check endpoints.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn liveness() -> &'static str {
    "ok"
}

/// Status endpoint reporting `UP` with the current time.
pub async fn status() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
