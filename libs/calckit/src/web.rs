//! Built-in liveness endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// Detailed health check: status plus current timestamp (RFC 3339).
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Add `/health` (JSON) and `/healthz` (plain "ok") to the router.
#[must_use]
pub fn with_health_routes(router: Router) -> Router {
    router
        .route("/health", get(health_check))
        .route("/healthz", get(|| async { "ok" }))
}
