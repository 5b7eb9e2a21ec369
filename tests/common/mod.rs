#![allow(dead_code)]

use std::{collections::HashSet, path::Path, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mixtape_api::{
    app,
    auth::token_service::AuthConfig,
    catalog::{Catalog, CatalogType},
    config::BehaviorConfig,
    helpers::db_helpers::define_schema,
    services::avatar_service::AvatarStore,
    AppState, Error, Result,
};
use serde_json::{json, Value};
use surrealdb::engine::any::connect;
use tempfile::TempDir;
use tower::ServiceExt;

/// Catalog where only the listed ids exist.
pub struct FakeCatalog {
    known: HashSet<String>,
}

impl FakeCatalog {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            known: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(
        &self,
        query: &str,
        types: &[CatalogType],
        limit: u64,
        offset: u64,
    ) -> Result<Value> {
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        Ok(json!({ "q": query, "types": types, "limit": limit, "offset": offset }))
    }

    async fn fetch_element(&self, id: &str, kind: CatalogType) -> Result<Value> {
        if self.known.contains(id) {
            Ok(json!({ "id": id, "type": kind.to_string() }))
        } else {
            Err(Error::CatalogFailure {
                message: "Resource not found".to_string(),
            })
        }
    }

    async fn validate_id(&self, id: &str, _kind: CatalogType) -> bool {
        self.known.contains(id)
    }
}

pub struct TestApp {
    pub router: Router,
    pub avatars: AvatarStore,
    _uploads: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let db = connect("mem://").await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    define_schema(&db).await.unwrap();

    let uploads = tempfile::tempdir().unwrap();
    let avatars = AvatarStore::new(uploads.path());
    avatars.init().await.unwrap();

    let state = AppState {
        db,
        catalog: Arc::new(FakeCatalog::with_ids(&["track-1", "track-2", "artist-1"])),
        avatars: avatars.clone(),
        auth_config: AuthConfig::new("integration-secret", "http://localhost:8080"),
        behavior: BehaviorConfig::default(),
    };

    TestApp {
        router: app(state),
        avatars,
        _uploads: uploads,
    }
}

impl TestApp {
    /// Sends a JSON request and returns the status with the parsed body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    /// Uploads a small JPEG as the `avatar` multipart field.
    pub async fn upload_avatar(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let boundary = "mixtape-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"avatar\"; filename=\"a.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n\
             jpeg-bytes\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub fn uploads_dir(&self) -> &Path {
        self._uploads.path()
    }

    /// Signs up `username` and logs in. Returns `(user_id, token)`.
    pub async fn register(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "email": format!("{username}@example.com"),
                    "username": username,
                    "password": "Secret12!",
                    "firstName": "Test",
                    "lastName": "User",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": "Secret12!" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        (
            body["userId"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
