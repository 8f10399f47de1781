//! Localization trait (port)

pub trait Translator: Send + Sync {
    /// Text for `key` in `language`, `None` when the key is unknown.
    fn translate(&self, key: &str, language: &str) -> Option<String>;
}
