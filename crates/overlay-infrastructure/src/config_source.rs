// ============================================================================
// Overlay Infrastructure - Layered Configuration Source
// File: crates/overlay-infrastructure/src/config_source.rs
// Description: Site config < extension override < environment
// ============================================================================

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use overlay_core::domain::{IconSize, RawMenuSettings};
use overlay_core::error::CoreError;
use overlay_core::repositories::ConfigSource;
use overlay_shared::config::FrontendEditSettings;

pub const SITE_CONFIG_FILE: &str = "frontend_edit.toml";
pub const LOCAL_CONFIG_FILE: &str = "frontend_edit.local.toml";

/// Reads the menu settings from disk and environment on every call, so each
/// request sees the current state of the store.
pub struct LayeredConfigSource {
    dir: PathBuf,
    env_prefix: String,
    icon_size: IconSize,
}

impl LayeredConfigSource {
    pub fn new(
        dir: impl Into<PathBuf>,
        env_prefix: impl Into<String>,
        icon_size: IconSize,
    ) -> Self {
        Self {
            dir: dir.into(),
            env_prefix: env_prefix.into(),
            icon_size,
        }
    }

    pub fn from_settings(settings: &FrontendEditSettings) -> Self {
        Self::new(
            &settings.config_dir,
            &settings.env_prefix,
            IconSize::parse_or_default(&settings.icon_size),
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn env_marker(&self) -> String {
        format!("{}__", self.env_prefix)
    }

    fn has_env_overrides(&self) -> bool {
        let marker = self.env_marker();
        std::env::vars().any(|(key, _)| key.starts_with(&marker))
    }
}

impl ConfigSource for LayeredConfigSource {
    fn resolve_layered_config(&self) -> Result<Option<RawMenuSettings>, CoreError> {
        let site = self.dir.join(SITE_CONFIG_FILE);
        let local = self.dir.join(LOCAL_CONFIG_FILE);

        if !site.is_file() && !local.is_file() && !self.has_env_overrides() {
            debug!("No frontend edit configuration under {}", self.dir.display());
            return Ok(None);
        }

        let settings = Config::builder()
            .add_source(File::from(site).required(false))
            .add_source(File::from(local).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<RawMenuSettings>())
            .map_err(|e| CoreError::ConfigSource(e.to_string()))?;

        Ok(Some(settings))
    }

    fn default_icon_size(&self) -> IconSize {
        self.icon_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::domain::{ListSetting, MenuConfiguration};
    use std::fs;

    #[test]
    fn test_missing_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = LayeredConfigSource::new(dir.path(), "OVERLAY_TEST_NONE", IconSize::Small);
        assert_eq!(source.resolve_layered_config().unwrap(), None);
    }

    #[test]
    fn test_local_file_overrides_site_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SITE_CONFIG_FILE),
            r#"
ignore_pids = "5, 8"
ignore_types = "html"
simple_mode = false

[default_menu_structure]
info = true
edit = true
action = true
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            r#"
ignore_types = ["html", "div"]

[default_menu_structure]
action = false
"#,
        )
        .unwrap();

        let source = LayeredConfigSource::new(dir.path(), "OVERLAY_TEST_FILES", IconSize::Medium);
        let raw = source.resolve_layered_config().unwrap().unwrap();
        assert_eq!(raw.ignore_pids, Some(ListSetting::Csv("5, 8".into())));

        let config = MenuConfiguration::from(raw);
        assert_eq!(config.ignored_page_id_values(), vec![5, 8]);
        assert!(config.is_type_ignored("div"));
        assert!(config.check_default_menu_structure("info"));
        assert!(!config.check_default_menu_structure("action"));
        assert_eq!(source.default_icon_size(), IconSize::Medium);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SITE_CONFIG_FILE), "debug = false\n").unwrap();
        std::env::set_var("OVERLAY_TEST_ENV__DEBUG", "true");

        let source = LayeredConfigSource::new(dir.path(), "OVERLAY_TEST_ENV", IconSize::Small);
        let config = MenuConfiguration::from(source.resolve_layered_config().unwrap().unwrap());
        std::env::remove_var("OVERLAY_TEST_ENV__DEBUG");

        assert!(config.debug);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SITE_CONFIG_FILE), "ignore_pids = [").unwrap();

        let source = LayeredConfigSource::new(dir.path(), "OVERLAY_TEST_BROKEN", IconSize::Small);
        assert!(matches!(
            source.resolve_layered_config(),
            Err(CoreError::ConfigSource(_))
        ));
    }
}
