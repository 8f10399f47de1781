//! Settings resolver
//!
//! Reads the layered configuration once per request and serves the
//! resolved [`MenuConfiguration`] from then on.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::domain::{IconSize, MenuConfiguration};
use crate::repositories::ConfigSource;

pub struct SettingsResolver {
    source: Arc<dyn ConfigSource>,
    resolved: OnceCell<MenuConfiguration>,
}

impl SettingsResolver {
    /// Create a resolver for one request. Never share it across requests.
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            resolved: OnceCell::new(),
        }
    }

    pub fn resolve(&self) -> &MenuConfiguration {
        self.resolved.get_or_init(|| match self.source.resolve_layered_config() {
            Ok(Some(raw)) => MenuConfiguration::from(raw),
            Ok(None) => {
                debug!("No frontend edit configuration found, using defaults");
                MenuConfiguration::default()
            }
            Err(e) => {
                warn!("Failed to read frontend edit configuration, using defaults: {}", e);
                MenuConfiguration::default()
            }
        })
    }

    pub fn check_default_menu_structure(&self, section_key: &str) -> bool {
        self.resolve().check_default_menu_structure(section_key)
    }

    pub fn check_simple_mode_menu_structure(&self) -> bool {
        self.resolve().check_simple_mode_menu_structure()
    }

    pub fn default_icon_size(&self) -> IconSize {
        self.source.default_icon_size()
    }
}
