//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = state.file_service.health().await;

    Json(HealthResponse {
        status: if health.is_healthy() { "ok" } else { "degraded" }.to_string(),
        database: if health.database {
            "connected"
        } else {
            "unreachable"
        }
        .to_string(),
        object_store: if health.object_store {
            "available"
        } else {
            "unreachable"
        }
        .to_string(),
    })
}
