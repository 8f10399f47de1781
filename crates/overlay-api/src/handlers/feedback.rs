//! GET /api/v1/feedback-messages

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::response::FeedbackResponse;
use crate::state::AppState;

pub async fn feedback_messages(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let messages = state.service.feedback_messages(actor).await?;
    Ok(Json(FeedbackResponse { messages }))
}
