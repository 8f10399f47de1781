// ============================================================================
// Overlay Core - Content Record Entity
// File: crates/overlay-core/src/domain/content_record.rs
// Description: Read-only view of a content row fetched from the CMS
// ============================================================================

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Type code of plugin records; their behaviour is selected by a subtype.
pub const PLUGIN_TYPE: &str = "list";

const TYPE_FIELDS: &[&str] = &["CType", "type"];
const SUBTYPE_FIELDS: &[&str] = &["list_type"];
const LANGUAGE_FIELDS: &[&str] = &["sys_language_uid"];
const TRANSLATION_PARENT_FIELDS: &[&str] = &["l18n_parent", "l10n_parent"];
const TITLE_FIELDS: &[&str] = &["header", "title"];

/// Row exactly as delivered by a record source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub table: String,
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(table: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            table: table.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub table: String,
    pub uid: i64,
    pub pid: i64,
    /// Empty when the row has no type column.
    pub record_type: String,
    pub subtype: Option<String>,
    /// `-1` marks a record shown in all languages.
    pub language: i64,
    pub translation_parent: Option<i64>,
    pub title: Option<String>,
    pub hidden: bool,
    pub edit_locked: bool,
    fields: Map<String, Value>,
}

impl ContentRecord {
    /// Map a raw row, rejecting rows without a usable identifier or page.
    pub fn from_raw(raw: RawRecord) -> Result<Self, CoreError> {
        let RawRecord { table, fields } = raw;

        let uid = int_field(&fields, &["uid"])
            .filter(|uid| *uid > 0)
            .ok_or_else(|| CoreError::MalformedRecord(format!("{}: missing uid", table)))?;
        let pid = int_field(&fields, &["pid"]).ok_or_else(|| {
            CoreError::MalformedRecord(format!("{}:{}: missing pid", table, uid))
        })?;

        Ok(Self {
            uid,
            pid,
            record_type: string_field(&fields, TYPE_FIELDS).unwrap_or_default(),
            subtype: string_field(&fields, SUBTYPE_FIELDS),
            language: int_field(&fields, LANGUAGE_FIELDS).unwrap_or(0),
            translation_parent: int_field(&fields, TRANSLATION_PARENT_FIELDS).filter(|p| *p > 0),
            title: string_field(&fields, TITLE_FIELDS),
            hidden: flag_field(&fields, "hidden"),
            edit_locked: flag_field(&fields, "editlock"),
            table,
            fields,
        })
    }

    pub fn is_plugin(&self) -> bool {
        self.record_type == PLUGIN_TYPE
    }

    /// Whether the record is shown for `language`.
    pub fn matches_language(&self, language: i64) -> bool {
        self.language == language || self.language == -1
    }

    /// Raw columns, as sent to the overlay.
    pub fn element(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

fn int_field(fields: &Map<String, Value>, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|name| match fields.get(*name)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn string_field(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match fields.get(*name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn flag_field(fields: &Map<String, Value>, name: &str) -> bool {
    match fields.get(name) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true"),
        _ => false,
    }
}
