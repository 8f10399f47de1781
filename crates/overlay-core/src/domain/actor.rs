//! Actor (logged-in editor) domain entity

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default backend language key.
pub const DEFAULT_LANGUAGE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub uid: i64,
    pub username: String,
    /// Backend language used for menu labels.
    pub language: String,
    pub is_admin: bool,
    /// Pages (and their subtrees) the editor may work on.
    pub db_mounts: Vec<i64>,
    pub tables_modify: BTreeSet<String>,
    /// Allowed record types; empty means no restriction.
    pub allowed_types: BTreeSet<String>,
    /// Persisted opt-out of the overlay, as loaded for this request.
    pub editing_disabled: bool,
    /// False until the session source has loaded the editor's permissions.
    pub initialized: bool,
}

impl Actor {
    pub fn new(uid: i64, username: impl Into<String>) -> Self {
        Self {
            uid,
            username: username.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            is_admin: false,
            db_mounts: Vec::new(),
            tables_modify: BTreeSet::new(),
            allowed_types: BTreeSet::new(),
            editing_disabled: false,
            initialized: true,
        }
    }

    pub fn admin(uid: i64, username: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::new(uid, username)
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn may_modify_table(&self, table: &str) -> bool {
        self.is_admin || self.tables_modify.contains(table)
    }

    pub fn may_edit_type(&self, record_type: &str) -> bool {
        self.is_admin || self.allowed_types.is_empty() || self.allowed_types.contains(record_type)
    }
}
