//! JWT session token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use overlay_shared::config::JwtSettings;

pub const SESSION_TOKEN_TYPE: &str = "editor_session";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject is not an editor id: {0}")]
    InvalidSubject(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Backend editor uid.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn editor_uid(&self) -> Result<i64, JwtError> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|uid| *uid > 0)
            .ok_or_else(|| JwtError::InvalidSubject(self.sub.clone()))
    }
}

pub struct JwtService {
    secret: String,
    session_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, session_expiry: i64) -> Self {
        Self {
            secret,
            session_expiry,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(settings.secret.clone(), settings.session_expiry)
    }

    pub fn generate_session_token(&self, editor_uid: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: editor_uid.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.session_expiry)).timestamp(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })?;

        if claims.token_type != SESSION_TOKEN_TYPE {
            return Err(JwtError::ValidationError(format!(
                "unexpected token type {}",
                claims.token_type
            )));
        }
        Ok(claims)
    }

    /// Editor uid carried by a valid session token.
    pub fn editor_uid(&self, token: &str) -> Result<i64, JwtError> {
        self.validate_token(token)?.editor_uid()
    }
}
