//! Shared utilities for integration tests.

use std::fs;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

/// Write `content` at `relative` under `root`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A declarative router module answering GET `/` with `body`.
pub fn router_module(body: &str) -> String {
    router_module_at("/", body)
}

/// A declarative router module answering GET `path` with `body`.
pub fn router_module_at(path: &str, body: &str) -> String {
    format!(
        "kind = \"router\"\n\n[[routes]]\npath = \"{}\"\nbody = \"{}\"\n",
        path, body
    )
}

/// A TOML document that is plain data, not a router.
#[allow(dead_code)]
pub fn data_module() -> String {
    "greeting = \"hello\"\nretries = 3\n".to_string()
}

/// Dispatch one request in-process and return status and body text.
pub async fn request(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// GET `uri` in-process.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    request(router, Method::GET, uri).await
}
