use std::sync::Arc;

use overlay_core::services::FrontendEditService;
use overlay_security::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FrontendEditService>,
    pub jwt: Arc<JwtService>,
    /// Cookie carrying the session token when no bearer header is sent.
    pub session_cookie: String,
    pub service_name: String,
}
