//! Feedback (flash) messages queued for an editor by backend edits

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackSeverity {
    Notice,
    #[default]
    Info,
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    #[serde(default)]
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub severity: FeedbackSeverity,
}
