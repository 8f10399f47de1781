//! Localizable menu labels
//!
//! Labels are kept as a sequence of localization keys and literal text so
//! the renderer can localize them late, after hooks had their say.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPart {
    /// Localization key, resolved by a translator at render time.
    Key(String),
    /// Literal text, never localized.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    parts: Vec<LabelPart>,
}

impl Label {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            parts: vec![LabelPart::Key(key.into())],
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![LabelPart::Text(text.into())],
        }
    }

    pub fn then_key(mut self, key: impl Into<String>) -> Self {
        self.parts.push(LabelPart::Key(key.into()));
        self
    }

    pub fn then_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(LabelPart::Text(text.into()));
        self
    }

    pub fn parts(&self) -> &[LabelPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| match part {
            LabelPart::Key(key) => key.is_empty(),
            LabelPart::Text(text) => text.is_empty(),
        })
    }

    /// Concatenate all parts, resolving keys through `lookup`.
    pub fn resolve<F>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                LabelPart::Key(key) => out.push_str(&lookup(key)),
                LabelPart::Text(text) => out.push_str(text),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_mixes_keys_and_text() {
        let label = Label::key("type.text").then_text(": Hello").then_text(" [uid: 10]");
        let resolved = label.resolve(|key| match key {
            "type.text" => "Text".to_string(),
            other => other.to_string(),
        });
        assert_eq!(resolved, "Text: Hello [uid: 10]");
    }

    #[test]
    fn test_empty_label() {
        assert!(Label::default().is_empty());
        assert!(Label::text("").is_empty());
        assert!(!Label::key("edit").is_empty());
    }
}
