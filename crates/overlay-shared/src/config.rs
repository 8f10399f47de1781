//! Configuration management

use std::collections::HashMap;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;
use crate::constants::{
    DEFAULT_CONTENT_TABLE, DEFAULT_FRONTEND_EDIT_CONFIG_DIR, DEFAULT_ICON_BASE_PATH,
    DEFAULT_SESSION_COOKIE,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub frontend_edit: FrontendEditSettings,
    #[serde(default)]
    pub routes: RouteSettings,
    /// Keyed by type code, or `list:<subtype>` for plugin records.
    #[serde(default)]
    pub content_types: HashMap<String, ContentTypeSettings>,
    #[serde(default)]
    pub tables: HashMap<String, TableSettings>,
    /// language -> label key -> text
    #[serde(default)]
    pub labels: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    pub icons: IconSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Origins allowed to call the API from the browser.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub session_expiry: i64,
    #[serde(default = "default_session_cookie")]
    pub cookie_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelemetrySettings {
    /// Rolling JSON log files are written here when set.
    pub log_directory: Option<String>,
    pub log_file_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FrontendEditSettings {
    /// Directory holding `frontend_edit.toml` and `frontend_edit.local.toml`.
    pub config_dir: String,
    pub env_prefix: String,
    pub content_table: String,
    /// `small`, `medium` or `large`.
    pub icon_size: String,
}

impl Default for FrontendEditSettings {
    fn default() -> Self {
        Self {
            config_dir: DEFAULT_FRONTEND_EDIT_CONFIG_DIR.to_string(),
            env_prefix: "FRONTEND_EDIT".to_string(),
            content_table: DEFAULT_CONTENT_TABLE.to_string(),
            icon_size: "small".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RouteSettings {
    pub base_path: String,
    pub paths: HashMap<String, String>,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            base_path: "/typo3".to_string(),
            paths: default_route_paths(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentTypeSettings {
    pub label: String,
    pub icon: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TableSettings {
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IconSettings {
    pub base_path: String,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_ICON_BASE_PATH.to_string(),
        }
    }
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

fn default_route_paths() -> HashMap<String, String> {
    [
        ("record_edit", "/record/edit"),
        ("tce_db", "/record/commit"),
        ("show_item", "/record/info"),
        ("move_element", "/move-element"),
        ("record_history", "/record/history"),
        ("new_content_element_wizard", "/record/content/wizard/new"),
        ("web_layout", "/module/web/layout"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "overlay-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.session_expiry", 3600)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must not be empty".into()));
        }
        if self.jwt.session_expiry <= 0 {
            return Err(AppError::InvalidConfig("jwt.session_expiry must be positive".into()));
        }
        Ok(())
    }
}
