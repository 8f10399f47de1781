//! Feedback message decoding

use tracing::warn;

use crate::domain::FeedbackMessage;

/// Decode queued messages, dropping entries that fail to deserialize.
pub fn decode_messages(raw: &[String]) -> Vec<FeedbackMessage> {
    raw.iter()
        .filter_map(|entry| match serde_json::from_str::<FeedbackMessage>(entry) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("Dropping undecodable feedback message: {}", e);
                None
            }
        })
        .collect()
}
