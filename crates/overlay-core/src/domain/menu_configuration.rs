// ============================================================================
// Overlay Core - Menu Configuration
// File: crates/overlay-core/src/domain/menu_configuration.rs
// Description: Resolved per-request settings driving filtering and menus
// ============================================================================

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Deserialize;

/// Section keys understood by `default_menu_structure`.
pub mod section {
    pub const INFO: &str = "info";
    pub const EDIT: &str = "edit";
    pub const ACTION: &str = "action";
    pub const ADDITIONAL_DATA: &str = "additional_data";
}

/// Truthy-ish configuration value (`true`, `1`, `"1"`, `"on"` ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl Toggle {
    pub fn is_enabled(&self) -> bool {
        match self {
            Toggle::Flag(b) => *b,
            Toggle::Number(n) => *n != 0,
            Toggle::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
        }
    }
}

/// List setting, either comma separated or already split.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListSetting {
    Number(i64),
    Csv(String),
    Items(Vec<ListItem>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Number(i64),
    Text(String),
}

impl ListSetting {
    /// Trimmed, non-empty values. An empty string yields an empty set.
    pub fn values(&self) -> BTreeSet<String> {
        let raw: Vec<String> = match self {
            ListSetting::Number(n) => vec![n.to_string()],
            ListSetting::Csv(csv) => csv.split(',').map(str::to_string).collect(),
            ListSetting::Items(items) => items
                .iter()
                .map(|item| match item {
                    ListItem::Number(n) => n.to_string(),
                    ListItem::Text(s) => s.clone(),
                })
                .collect(),
        };
        raw.iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Settings as read from the layered configuration store. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMenuSettings {
    pub ignore_pids: Option<ListSetting>,
    pub ignore_types: Option<ListSetting>,
    pub ignore_list_types: Option<ListSetting>,
    pub ignore_uids: Option<ListSetting>,
    pub default_menu_structure: Option<IndexMap<String, Toggle>>,
    pub simple_mode: Option<Toggle>,
    pub link_target_blank: Option<Toggle>,
    pub debug: Option<Toggle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuConfiguration {
    pub ignored_page_ids: BTreeSet<String>,
    pub ignored_types: BTreeSet<String>,
    pub ignored_list_types: BTreeSet<String>,
    pub ignored_uids: BTreeSet<String>,
    /// `None` when no structure is configured, meaning every section is on.
    pub default_menu_structure: Option<IndexMap<String, bool>>,
    pub simple_mode: bool,
    pub link_target_blank: bool,
    pub debug: bool,
}

impl From<RawMenuSettings> for MenuConfiguration {
    fn from(raw: RawMenuSettings) -> Self {
        let list = |setting: &Option<ListSetting>| {
            setting.as_ref().map(ListSetting::values).unwrap_or_default()
        };
        let flag = |toggle: &Option<Toggle>| toggle.as_ref().is_some_and(Toggle::is_enabled);

        Self {
            ignored_page_ids: list(&raw.ignore_pids),
            ignored_types: list(&raw.ignore_types),
            ignored_list_types: list(&raw.ignore_list_types),
            ignored_uids: list(&raw.ignore_uids),
            default_menu_structure: raw.default_menu_structure.as_ref().map(|map| {
                map.iter()
                    .map(|(key, toggle)| (key.trim().to_string(), toggle.is_enabled()))
                    .collect()
            }),
            simple_mode: flag(&raw.simple_mode),
            link_target_blank: flag(&raw.link_target_blank),
            debug: flag(&raw.debug),
        }
    }
}

impl MenuConfiguration {
    /// A section is on when no structure is configured, otherwise it must
    /// be listed and truthy.
    pub fn check_default_menu_structure(&self, section_key: &str) -> bool {
        match &self.default_menu_structure {
            None => true,
            Some(map) => map.get(section_key).copied().unwrap_or(false),
        }
    }

    /// True only for the "edit on, everything else off" structure.
    pub fn check_simple_mode_menu_structure(&self) -> bool {
        let Some(map) = &self.default_menu_structure else {
            return false;
        };
        map.get(section::EDIT).copied().unwrap_or(false)
            && map
                .iter()
                .filter(|(key, _)| key.as_str() != section::EDIT)
                .all(|(_, enabled)| !enabled)
    }

    pub fn is_simple_mode(&self) -> bool {
        self.simple_mode || self.check_simple_mode_menu_structure()
    }

    /// Ignored page ids that parse as numbers.
    pub fn ignored_page_id_values(&self) -> Vec<i64> {
        self.ignored_page_ids
            .iter()
            .filter_map(|pid| pid.parse().ok())
            .collect()
    }

    pub fn is_uid_ignored(&self, uid: i64) -> bool {
        self.ignored_uids.contains(&uid.to_string())
    }

    pub fn is_type_ignored(&self, record_type: &str) -> bool {
        self.ignored_types.contains(record_type)
    }

    pub fn is_subtype_ignored(&self, subtype: &str) -> bool {
        self.ignored_list_types.contains(subtype)
    }
}
