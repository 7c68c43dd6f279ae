#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use axum_charsheet::{
    app,
    auth::AuthManager,
    config::Config,
    services::MemoryRepository,
    state::AppState,
};

pub fn test_config() -> Config {
    Config::builder()
        .unwrap()
        .set_override("server.port", 0_i64)
        .unwrap()
        .set_override("database.backend", "memory")
        .unwrap()
        .set_override("auth.bcrypt_cost", 4_i64)
        .unwrap()
        .set_override("session.secret", "0123456789abcdef0123456789abcdef")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

pub fn test_app() -> Router {
    let config = test_config();
    let auth = AuthManager::from_config(&config.session, &config.auth).unwrap();
    app(AppState::new(Arc::new(MemoryRepository::new()), auth, config))
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::from(body.to_owned())).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` of the session cookie set by the response, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .map(|v| v.split(';').next().unwrap().to_string())
}

pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect()
}

pub async fn register(app: &Router, username: &str, password: &str) {
    let body = format!(
        "username={}&password={}&confirm_password={}",
        username, password, password
    );
    let response = post_form(app, "/register", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?message="));
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = format!("username={}&password={}", username, password);
    let response = post_form(app, "/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("login should set a session cookie")
}
