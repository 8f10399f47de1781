// ============================================================================
// Overlay API - Edit Information Handler
// File: crates/overlay-api/src/handlers/edit_information.rs
// ============================================================================
//! POST /api/v1/edit-information

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use validator::Validate;

use overlay_core::domain::ClientPayload;
use overlay_core::services::{EditInformation, EditInformationRequest};

use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditInformationQuery {
    #[validate(range(min = 1, message = "pid must be a positive page id"))]
    pub pid: i64,
    #[serde(default)]
    #[validate(range(min = -1, message = "language must be -1 or a language id"))]
    pub language: i64,
    #[serde(default = "default_return_url")]
    pub return_url: String,
}

fn default_return_url() -> String {
    "/".to_string()
}

pub async fn edit_information(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    query: Result<Query<EditInformationQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EditInformation>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    query
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let payload = parse_payload(&headers, &body)?;
    debug!(
        "Edit information requested for page {} language {}",
        query.pid, query.language
    );

    let request = EditInformationRequest {
        page_id: query.pid,
        language: query.language,
        return_url: query.return_url,
        payload,
    };
    let information = state.service.edit_information(actor, request).await?;
    Ok(Json(information))
}

/// Optional JSON side-channel body. An empty body means no payload.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<ClientPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ClientPayload::default());
    }

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if !is_json {
        return Err(ApiError::BadRequest(
            "Content-Type must be application/json".to_string(),
        ));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {}", e)))?;
    ClientPayload::parse(&value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        headers
    }

    #[test]
    fn test_empty_body_needs_no_content_type() {
        let payload = parse_payload(&HeaderMap::new(), b"  ").unwrap();
        assert_eq!(payload, ClientPayload::default());
    }

    #[test]
    fn test_body_rules() {
        assert!(matches!(
            parse_payload(&HeaderMap::new(), br#"{"_uids":[1]}"#),
            Err(ApiError::BadRequest(_))
        ));
        assert!(parse_payload(&json_headers(), b"{nope").is_err());
        assert!(parse_payload(&json_headers(), b"[1,2]").is_err());

        let payload = parse_payload(&json_headers(), br#"{"_uids":[3,"4"]}"#).unwrap();
        assert_eq!(payload.uid_scope, Some(vec![3, 4]));
    }

    #[test]
    fn test_query_validation() {
        let query = EditInformationQuery {
            pid: 0,
            language: 0,
            return_url: "/".into(),
        };
        assert!(query.validate().is_err());

        let query = EditInformationQuery {
            pid: 5,
            language: -1,
            return_url: "/".into(),
        };
        assert!(query.validate().is_ok());
    }
}
