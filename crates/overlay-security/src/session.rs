//! Session token extraction

use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Where a session token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionToken {
    Bearer(String),
    Cookie(String),
}

impl SessionToken {
    /// Prefer an `Authorization: Bearer` header, then the session cookie.
    pub fn extract(
        authorization: Option<&str>,
        cookie_header: Option<&str>,
        cookie_name: &str,
    ) -> Option<Self> {
        if let Some(token) = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            return Some(SessionToken::Bearer(token.to_string()));
        }

        let token = cookie_header.and_then(|header| find_cookie(header, cookie_name));
        if token.is_none() {
            debug!("No session token on request");
        }
        token.map(SessionToken::Cookie)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionToken::Bearer(token) | SessionToken::Cookie(token) => token,
        }
    }
}

fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
