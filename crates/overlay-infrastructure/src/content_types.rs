// ============================================================================
// Overlay Infrastructure - Content Type Registry
// File: crates/overlay-infrastructure/src/content_types.rs
// ============================================================================

use std::collections::HashMap;

use overlay_core::domain::TypeConfig;
use overlay_core::repositories::TypeConfigSource;
use overlay_shared::AppConfig;

/// Built-in content types: (type code, label key, icon).
const BUILTIN_TYPES: &[(&str, &str, &str)] = &[
    ("header", "type.header", "content-header"),
    ("text", "type.text", "content-text"),
    ("textpic", "type.textpic", "content-textpic"),
    ("textmedia", "type.textmedia", "content-textmedia"),
    ("image", "type.image", "content-image"),
    ("bullets", "type.bullets", "content-bullets"),
    ("table", "type.table", "content-table"),
    ("uploads", "type.uploads", "content-special-uploads"),
    ("html", "type.html", "content-special-html"),
    ("shortcut", "type.shortcut", "content-special-shortcut"),
    ("list", "type.list", "content-plugin"),
];

/// Type display settings keyed by `<type>` or `<type>:<subtype>`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeConfig>,
    table_icons: HashMap<String, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in types overlaid with the configured ones.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = Self::new();
        for (code, label, icon) in BUILTIN_TYPES {
            registry.register(
                *code,
                TypeConfig {
                    label: label.to_string(),
                    icon: Some(icon.to_string()),
                    group: Some("common".to_string()),
                },
            );
        }
        for (code, settings) in &config.content_types {
            registry.register(
                code.trim(),
                TypeConfig {
                    label: settings.label.clone(),
                    icon: settings.icon.clone(),
                    group: settings.group.clone(),
                },
            );
        }
        for (table, settings) in &config.tables {
            if let Some(icon) = &settings.icon {
                registry.register_table_icon(table, icon);
            }
        }
        registry
    }

    pub fn register(&mut self, code: impl Into<String>, config: TypeConfig) {
        self.types.insert(code.into(), config);
    }

    pub fn register_table_icon(&mut self, table: impl Into<String>, icon: impl Into<String>) {
        self.table_icons.insert(table.into(), icon.into());
    }
}

impl TypeConfigSource for TypeRegistry {
    fn config_for(&self, type_code: &str, subtype_code: Option<&str>) -> Option<TypeConfig> {
        subtype_code
            .filter(|subtype| !subtype.is_empty())
            .and_then(|subtype| self.types.get(&format!("{}:{}", type_code, subtype)))
            .or_else(|| self.types.get(type_code))
            .cloned()
    }

    fn table_icon(&self, table: &str) -> Option<String> {
        self.table_icons.get(table).cloned()
    }
}
