//! Content type configuration entity

use serde::{Deserialize, Serialize};

/// Display settings of one record type (or plugin subtype).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Localization key or literal name of the type.
    pub label: String,
    pub icon: Option<String>,
    pub group: Option<String>,
}
