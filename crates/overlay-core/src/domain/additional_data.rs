// ============================================================================
// Overlay Core - Client Side-Channel Payload
// File: crates/overlay-core/src/domain/additional_data.rs
// Description: Additional data entries and onepager uid scope sent by the page
// ============================================================================

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const UID_SCOPE_KEY: &str = "_uids";
pub const MAX_UID_SCOPE: usize = 500;
/// Upper bound of a record identifier column.
pub const MAX_RECORD_UID: i64 = i32::MAX as i64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload must be a JSON object")]
    NotAnObject,

    #[error("`_uids` must be an array")]
    InvalidUidScope,

    #[error("Entries for record {0} must be an array")]
    InvalidEntries(String),
}

/// Link injected by a page template to extend one record's menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdditionalDataEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default, deserialize_with = "lenient_uid")]
    pub uid: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget<'a> {
    Record { table: &'a str, uid: i64 },
    Url(&'a str),
}

impl AdditionalDataEntry {
    /// Where the entry points to. A record target wins over a URL; `None`
    /// means the entry is unusable.
    pub fn target(&self) -> Option<EntryTarget<'_>> {
        let table = self.table.as_deref().map(str::trim).filter(|t| !t.is_empty());
        if let (Some(table), Some(uid)) = (table, self.uid.filter(|uid| *uid > 0)) {
            return Some(EntryTarget::Record { table, uid });
        }
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(EntryTarget::Url)
    }

    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().map(str::trim).filter(|i| !i.is_empty())
    }
}

/// Parsed side-channel body of an edit-information request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPayload {
    /// Onepager scoping list; `None` when the client did not send one.
    pub uid_scope: Option<Vec<i64>>,
    pub additional: HashMap<i64, Vec<AdditionalDataEntry>>,
}

impl ClientPayload {
    pub fn parse(value: &Value) -> Result<Self, PayloadError> {
        let object = value.as_object().ok_or(PayloadError::NotAnObject)?;
        let mut payload = ClientPayload::default();

        for (key, value) in object {
            if key == UID_SCOPE_KEY {
                let values = value.as_array().ok_or(PayloadError::InvalidUidScope)?;
                payload.uid_scope = Some(normalize_uid_scope(values));
                continue;
            }

            let Ok(uid) = key.trim().parse::<i64>() else {
                debug!("Ignoring non-numeric payload key: {}", key);
                continue;
            };

            let items = value
                .as_array()
                .ok_or_else(|| PayloadError::InvalidEntries(key.clone()))?;
            let entries: Vec<AdditionalDataEntry> = items
                .iter()
                .filter_map(|item| match serde_json::from_value(item.clone()) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Dropping malformed additional data entry for record {}: {}", uid, e);
                        None
                    }
                })
                .collect();

            if !entries.is_empty() {
                payload.additional.entry(uid).or_default().extend(entries);
            }
        }

        Ok(payload)
    }

    pub fn entries_for(&self, uid: i64) -> Option<&[AdditionalDataEntry]> {
        self.additional
            .get(&uid)
            .map(Vec::as_slice)
            .filter(|entries| !entries.is_empty())
    }
}

/// Keep positive identifiers in column range, drop duplicates (first wins)
/// and cap the list at [`MAX_UID_SCOPE`].
pub fn normalize_uid_scope(values: &[Value]) -> Vec<i64> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter_map(value_as_uid)
        .filter(|uid| (1..=MAX_RECORD_UID).contains(uid))
        .filter(|uid| seen.insert(*uid))
        .take(MAX_UID_SCOPE)
        .collect()
}

fn value_as_uid(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_uid<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_uid))
}
