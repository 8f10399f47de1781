use axum::{extract::State, Json};
use chrono::Utc;

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.clone(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
