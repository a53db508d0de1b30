use axum::Json;

use crate::api::HealthResponse;

/// GET /api/health — liveness probe, does not touch the database
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp: chrono::Utc::now(),
    })
}
