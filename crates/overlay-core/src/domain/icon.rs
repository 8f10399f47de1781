//! Icon sizing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl IconSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconSize::Small => "small",
            IconSize::Medium => "medium",
            IconSize::Large => "large",
        }
    }

    /// Parse a configured size, falling back to small.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "medium" => IconSize::Medium,
            "large" => IconSize::Large,
            _ => IconSize::Small,
        }
    }
}
