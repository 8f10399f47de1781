//! Response bodies

use serde::Serialize;

use overlay_core::domain::FeedbackMessage;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn toggled(disabled: bool) -> Self {
        Self {
            success: true,
            disabled: Some(disabled),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            disabled: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub messages: Vec<FeedbackMessage>,
}
