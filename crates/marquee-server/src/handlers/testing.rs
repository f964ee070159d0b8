//! Helpers for driving the router in tests

use crate::extractors::auth::SESSION_COOKIE;
use crate::storage::MemorySessions;
use crate::views::Views;
use crate::{app, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use marquee_core::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;
use tower_cookies::Cookie;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let views = Views::load().expect("templates load");
        let state = AppState::new(store.clone(), Arc::new(MemorySessions::new()), views);
        Self { state, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        app(self.state.clone())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(get(uri, None)).await
    }

    pub async fn post(&self, uri: &str, form: &str) -> Response<Body> {
        self.send(post(uri, form, None)).await
    }
}

pub fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, Cookie::new(SESSION_COOKIE, token).to_string());
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, form: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = session {
        builder = builder.header(header::COOKIE, Cookie::new(SESSION_COOKIE, token).to_string());
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Target of a 303 redirect
pub fn redirect_target(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string()
}

/// Session token set by a response, if any
pub fn session_from(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse(v.to_string()).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
