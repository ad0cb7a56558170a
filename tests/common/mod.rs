//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use custom_page_server::engine::directory::password_digest;
use custom_page_server::engine::{Directory, FsPageRegistry};
use custom_page_server::{build_router, build_state_with};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const MOUNT: &str = "/custom-page";
pub const PASSWORD: &str = "bpm";

pub struct TestApp {
    pub router: Router,
    pub page_dir: PathBuf,
    _tmp: tempfile::TempDir,
}

fn directory() -> Directory {
    let yaml = format!(
        r#"
users:
  - username: walter.bates
    password_sha256: {digest}
    user_id: 4
    profiles: [User]
    permissions: [custompage_pageToken]
  - username: helen.kelly
    password_sha256: {digest}
    user_id: 5
    profiles: [User]
applications:
  - id: "1"
    token: hr
    profile: Administrator
    pages: [otherPage]
processes:
  - id: 7
    name: Travel request
    inputs:
      - name: destination
        type: TEXT
      - name: nights
        type: INTEGER
  - id: 8
    name: Retired
    enabled: false
"#,
        digest = password_digest(PASSWORD)
    );
    Directory::from_yaml(&yaml).unwrap()
}

/// Router over a temp page tree holding one page, `pageToken`, for tenant 1.
pub fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let registry = FsPageRegistry::new(tmp.path().join("pages"));
    let page_dir = registry.tenant_pages_dir(1).join("pageToken");
    fs::create_dir_all(page_dir.join("resources").join("css")).unwrap();
    fs::write(page_dir.join("index.html"), "<html>pageToken</html>").unwrap();
    fs::write(
        page_dir.join("resources").join("css").join("app.css"),
        "body { margin: 0; }",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("etc")).unwrap();
    fs::write(tmp.path().join("etc").join("passwd"), "root:x:0:0").unwrap();

    let state = build_state_with(MOUNT, registry, Arc::new(directory()), 1);
    TestApp {
        router: build_router(state),
        page_dir,
        _tmp: tmp,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log `username` in and return the `Cookie` header value to send back.
pub async fn login(app: &TestApp, username: &str) -> String {
    let response = send(
        app,
        post_json(
            "/loginservice",
            None,
            &json!({ "username": username, "password": PASSWORD }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
