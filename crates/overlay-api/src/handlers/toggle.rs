//! POST /api/v1/toggle-disabled

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use overlay_core::error::CoreError;

use crate::extract::CurrentActor;
use crate::response::ToggleResponse;
use crate::state::AppState;

pub async fn toggle_disabled(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Response {
    match state.service.toggle_disabled(actor).await {
        Ok(disabled) => (StatusCode::OK, Json(ToggleResponse::toggled(disabled))).into_response(),
        Err(CoreError::NoActor) => (
            StatusCode::FORBIDDEN,
            Json(ToggleResponse::failed(CoreError::NoActor.to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to toggle frontend editing [{}]: {}", e.code(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ToggleResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}
