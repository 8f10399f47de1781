use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tower::ServiceExt;

use overlay_api::{router, AppState};
use overlay_core::domain::{Actor, IconSize, RawMenuSettings, RawRecord, TypeConfig};
use overlay_core::error::CoreError;
use overlay_core::repositories::{
    ActorRepository, AncestrySource, ConfigSource, RecordSource,
};
use overlay_core::services::{Collaborators, FrontendEditService};
use overlay_infrastructure::{
    LabelCatalog, MountPermissionPolicy, RouteTable, SpanIconProvider, TypeRegistry,
};
use overlay_security::JwtService;
use overlay_shared::config::RouteSettings;

const SECRET: &str = "integration-secret";
const COOKIE: &str = "overlay_session";

struct PageRecords(Vec<RawRecord>);

#[async_trait]
impl RecordSource for PageRecords {
    async fn fetch_records(
        &self,
        page_id: i64,
        _: i64,
        _: bool,
    ) -> Result<Vec<RawRecord>, CoreError> {
        Ok(self
            .0
            .iter()
            .filter(|r| r.fields.get("pid") == Some(&json!(page_id)))
            .cloned()
            .collect())
    }

    async fn fetch_by_ids(&self, ids: &[i64], _: i64) -> Result<Vec<RawRecord>, CoreError> {
        Ok(self
            .0
            .iter()
            .filter(|r| ids.iter().any(|id| r.fields.get("uid") == Some(&json!(id))))
            .cloned()
            .collect())
    }

    async fn fetch_translation(
        &self,
        _: &str,
        _: i64,
        _: i64,
    ) -> Result<Option<RawRecord>, CoreError> {
        Ok(None)
    }

    async fn find_record(&self, _: &str, _: i64) -> Result<Option<RawRecord>, CoreError> {
        Ok(None)
    }
}

struct FlatTree;

#[async_trait]
impl AncestrySource for FlatTree {
    async fn is_descendant_of(&self, _: i64, _: i64) -> Result<bool, CoreError> {
        Ok(false)
    }
}

#[derive(Default)]
struct Editors {
    disabled: Mutex<HashMap<i64, bool>>,
    feedback: Mutex<Vec<String>>,
}

#[async_trait]
impl ActorRepository for Editors {
    async fn find_actor(&self, uid: i64) -> Result<Option<Actor>, CoreError> {
        if uid != 1 {
            return Ok(None);
        }
        let mut actor = Actor::admin(1, "admin");
        actor.editing_disabled = self.disabled.lock().get(&uid).copied().unwrap_or(false);
        Ok(Some(actor))
    }

    async fn load_editing_disabled(&self, uid: i64) -> Result<bool, CoreError> {
        Ok(self.disabled.lock().get(&uid).copied().unwrap_or(false))
    }

    async fn store_editing_disabled(&self, uid: i64, disabled: bool) -> Result<(), CoreError> {
        self.disabled.lock().insert(uid, disabled);
        Ok(())
    }

    async fn take_feedback_messages(&self, _: i64) -> Result<Vec<String>, CoreError> {
        Ok(std::mem::take(&mut *self.feedback.lock()))
    }
}

struct DefaultSettings;

impl ConfigSource for DefaultSettings {
    fn resolve_layered_config(&self) -> Result<Option<RawMenuSettings>, CoreError> {
        Ok(None)
    }

    fn default_icon_size(&self) -> IconSize {
        IconSize::Small
    }
}

fn record(uid: i64, pid: i64, header: &str) -> RawRecord {
    let fields = json!({ "uid": uid, "pid": pid, "CType": "text", "header": header });
    RawRecord::new("tt_content", fields.as_object().cloned().unwrap_or_default())
}

fn app_with(editors: Arc<Editors>) -> (Router, JwtService) {
    let mut types = TypeRegistry::new();
    types.register(
        "text",
        TypeConfig {
            label: "type.text".into(),
            icon: Some("content-text".into()),
            group: None,
        },
    );

    let service = FrontendEditService::new(Collaborators {
        records: Arc::new(PageRecords(vec![
            record(10, 5, "Welcome"),
            record(11, 5, "Second"),
            record(20, 6, "Elsewhere"),
        ])),
        ancestry: Arc::new(FlatTree),
        types: Arc::new(types),
        actors: editors,
        policy: Arc::new(MountPermissionPolicy::new()),
        routes: Arc::new(RouteTable::from_settings(&RouteSettings::default())),
        config: Arc::new(DefaultSettings),
        translator: Arc::new(LabelCatalog::new(&HashMap::new())),
        icons: Arc::new(SpanIconProvider::new("/icons")),
    });

    let state = AppState {
        service: Arc::new(service),
        jwt: Arc::new(JwtService::new(SECRET.to_string(), 3600)),
        session_cookie: COOKIE.to_string(),
        service_name: "overlay-server".to_string(),
    };
    (router(state), JwtService::new(SECRET.to_string(), 3600))
}

fn app() -> (Router, JwtService) {
    app_with(Arc::new(Editors::default()))
}

fn bearer(jwt: &JwtService) -> String {
    format!("Bearer {}", jwt.generate_session_token(1).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn edit_information(uri: &str, auth: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_reports_service() {
    let (app, _) = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "overlay-server");
}

#[tokio::test]
async fn test_anonymous_request_gets_empty_mapping() {
    let (app, _) = app();
    let request = edit_information("/api/v1/edit-information?pid=5", None, None);
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let (app, _) = app();
    let request =
        edit_information("/api/v1/edit-information?pid=5", Some("Bearer not-a-token"), None);
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_editor_receives_menus_for_page_records() {
    let (app, jwt) = app();
    let auth = bearer(&jwt);
    let request = edit_information(
        "/api/v1/edit-information?pid=5&language=0&returnUrl=%2Fhome",
        Some(auth.as_str()),
        None,
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_object().unwrap();
    assert_eq!(records.keys().collect::<Vec<_>>(), vec!["10", "11"]);

    let entry = &body["10"];
    assert_eq!(entry["element"]["uid"], json!(10));
    assert_eq!(entry["menu"]["type"], "menu");
    assert_eq!(entry["menu"]["label"], "Text");
    let children = entry["menu"]["children"].as_object().unwrap();
    assert!(children.contains_key("edit"));
    assert!(children.contains_key("hide"));
    assert!(children["edit"]["url"].as_str().unwrap().contains("returnUrl=%2Fhome"));
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let (app, jwt) = app();
    let token = jwt.generate_session_token(1).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/edit-information?pid=6")
        .header(header::COOKIE, format!("theme=dark; {}={}", COOKIE, token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("20").is_some());
}

#[tokio::test]
async fn test_uid_scope_limits_records() {
    let (app, jwt) = app();
    let auth = bearer(&jwt);
    let request = edit_information(
        "/api/v1/edit-information?pid=5",
        Some(auth.as_str()),
        Some(r#"{"_uids": [11, "11", -3]}"#),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_object().unwrap();
    assert_eq!(records.keys().collect::<Vec<_>>(), vec!["11"]);
}

#[tokio::test]
async fn test_bad_query_is_rejected() {
    let (app, jwt) = app();
    let auth = bearer(&jwt);

    for uri in [
        "/api/v1/edit-information",
        "/api/v1/edit-information?pid=abc",
        "/api/v1/edit-information?pid=0",
        "/api/v1/edit-information?pid=5&language=-2",
    ] {
        let (status, body) = send(&app, edit_information(uri, Some(auth.as_str()), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "BadRequest");
    }
}

#[tokio::test]
async fn test_bad_body_is_rejected() {
    let (app, jwt) = app();
    let auth = bearer(&jwt);

    for body in ["{not json", "[1, 2]", r#"{"_uids": "10"}"#] {
        let request =
            edit_information("/api/v1/edit-information?pid=5", Some(auth.as_str()), Some(body));
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/edit-information?pid=5")
        .header(header::AUTHORIZATION, &auth)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"_uids": [10]}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_requires_editor() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/toggle-disabled")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_toggle_flips_and_silences_overlay() {
    let (app, jwt) = app();
    let auth = bearer(&jwt);
    let toggle = || {
        Request::builder()
            .method("POST")
            .uri("/api/v1/toggle-disabled")
            .header(header::AUTHORIZATION, &auth)
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, toggle()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "disabled": true }));

    let request = edit_information("/api/v1/edit-information?pid=5", Some(auth.as_str()), None);
    let (_, body) = send(&app, request).await;
    assert_eq!(body, json!({}));

    let (_, body) = send(&app, toggle()).await;
    assert_eq!(body["disabled"], false);
}

#[tokio::test]
async fn test_feedback_messages_are_drained() {
    let editors = Arc::new(Editors::default());
    editors
        .feedback
        .lock()
        .push(r#"{"title":"Saved","message":"Record updated","severity":"ok"}"#.to_string());
    let (app, jwt) = app_with(editors);
    let auth = bearer(&jwt);
    let feedback = || {
        Request::builder()
            .uri("/api/v1/feedback-messages")
            .header(header::AUTHORIZATION, &auth)
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, feedback()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["message"], "Record updated");
    assert_eq!(body["messages"][0]["severity"], "ok");

    let (_, body) = send(&app, feedback()).await;
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (app, _) = app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
