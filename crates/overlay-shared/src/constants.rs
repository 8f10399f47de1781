//! Application-wide constants

pub const SERVICE_NAME: &str = "overlay-server";
pub const DEFAULT_LOG_FILTER: &str = "info,overlay=debug";
pub const DEFAULT_SESSION_COOKIE: &str = "overlay_session";
pub const DEFAULT_FRONTEND_EDIT_CONFIG_DIR: &str = "config";
pub const DEFAULT_CONTENT_TABLE: &str = "tt_content";
pub const DEFAULT_ICON_BASE_PATH: &str = "/_assets/icons";
