//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use tracing::warn;

use overlay_core::domain::Actor;
use overlay_security::SessionToken;

use crate::error::ApiError;
use crate::state::AppState;

/// Editor behind the request's session token, if any. A missing or invalid
/// token is not an error; the request simply has no editor.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Option<Actor>);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        let cookies = parts.headers.get(COOKIE).and_then(|v| v.to_str().ok());

        let Some(token) = SessionToken::extract(authorization, cookies, &state.session_cookie)
        else {
            return Ok(CurrentActor(None));
        };

        let uid = match state.jwt.editor_uid(token.as_str()) {
            Ok(uid) => uid,
            Err(e) => {
                warn!("Rejected session token: {}", e);
                return Ok(CurrentActor(None));
            }
        };

        let actor = state.service.load_actor(Some(uid)).await?;
        Ok(CurrentActor(actor))
    }
}
