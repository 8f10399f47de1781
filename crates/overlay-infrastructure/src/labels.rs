//! Label catalog

use std::collections::HashMap;

use overlay_core::domain::actor::DEFAULT_LANGUAGE;
use overlay_core::repositories::Translator;
use overlay_core::services::menu_builder::label_keys;

const DEFAULT_LABELS: &[(&str, &str)] = &[
    (label_keys::DIV_INFO, "Information"),
    (label_keys::DIV_EDIT, "Edit"),
    (label_keys::DIV_ACTION, "Actions"),
    (label_keys::DIV_ADDITIONAL, "Related"),
    (label_keys::EDIT_CONTENT, "Edit content element"),
    (label_keys::EDIT_PLUGIN, "Edit plugin"),
    (label_keys::EDIT_PAGE, "Open in page module"),
    (label_keys::HIDE, "Hide"),
    (label_keys::UNHIDE, "Unhide"),
    (label_keys::INFO, "Information"),
    (label_keys::MOVE, "Move"),
    (label_keys::HISTORY, "History"),
    (label_keys::NEW_CONTENT_AFTER, "New content element after"),
    ("type.header", "Header"),
    ("type.text", "Text"),
    ("type.textpic", "Text & Images"),
    ("type.textmedia", "Text & Media"),
    ("type.image", "Images"),
    ("type.bullets", "Bullet List"),
    ("type.table", "Table"),
    ("type.uploads", "File Links"),
    ("type.html", "Plain HTML"),
    ("type.shortcut", "Insert Records"),
    ("type.list", "Plugin"),
];

/// language -> key -> text, falling back to the default language.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    labels: HashMap<String, HashMap<String, String>>,
}

impl LabelCatalog {
    /// Built-in English labels overlaid with `overrides`.
    pub fn new(overrides: &HashMap<String, HashMap<String, String>>) -> Self {
        let mut labels: HashMap<String, HashMap<String, String>> = HashMap::new();
        labels.insert(
            DEFAULT_LANGUAGE.to_string(),
            DEFAULT_LABELS
                .iter()
                .map(|(key, text)| (key.to_string(), text.to_string()))
                .collect(),
        );
        for (language, entries) in overrides {
            labels
                .entry(language.clone())
                .or_default()
                .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self { labels }
    }
}

impl Translator for LabelCatalog {
    fn translate(&self, key: &str, language: &str) -> Option<String> {
        [language, DEFAULT_LANGUAGE]
            .iter()
            .find_map(|lang| self.labels.get(*lang)?.get(key))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_fallback() {
        let overrides = HashMap::from([(
            "de".to_string(),
            HashMap::from([("hide".to_string(), "Verbergen".to_string())]),
        )]);
        let catalog = LabelCatalog::new(&overrides);

        assert_eq!(catalog.translate("hide", "de").as_deref(), Some("Verbergen"));
        assert_eq!(catalog.translate("move", "de").as_deref(), Some("Move"));
        assert_eq!(catalog.translate("move", "fr").as_deref(), Some("Move"));
        assert!(catalog.translate("unknown.key", "de").is_none());
    }

    #[test]
    fn test_default_language_can_be_overridden() {
        let overrides = HashMap::from([(
            DEFAULT_LANGUAGE.to_string(),
            HashMap::from([("type.text".to_string(), "Regular text".to_string())]),
        )]);
        let catalog = LabelCatalog::new(&overrides);
        assert_eq!(catalog.translate("type.text", "en").as_deref(), Some("Regular text"));
        assert_eq!(catalog.translate("history", "en").as_deref(), Some("History"));
    }
}
