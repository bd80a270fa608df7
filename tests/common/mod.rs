use std::sync::Once;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use uuid::Uuid;

use agency_api::auth::{sign_token, Claims, ROLE_ADMIN};
use agency_api::routes;
use agency_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

static INIT: Once = Once::new();

/// Pin the session secret before the config singleton is first read. Every
/// test calls this first.
pub fn init() {
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
        // Gives the notification side-channel a destination; delivery still
        // needs a configured mailer, so tests inject their own.
        std::env::set_var("MAIL_ADMIN_ADDRESS", "leads@example.com");
    });
}

/// In-process application instance; drive it with `tower::ServiceExt::oneshot`.
pub fn app() -> Router {
    init();
    routes::app(AppState::new())
}

pub fn admin_token() -> String {
    let claims = Claims::with_expiry(
        Uuid::new_v4(),
        "admin@example.com".to_string(),
        ROLE_ADMIN.to_string(),
        1,
    );
    sign_token(claims, TEST_SECRET).expect("sign admin token")
}

pub fn user_token() -> String {
    let claims = Claims::with_expiry(
        Uuid::new_v4(),
        "user@example.com".to_string(),
        "user".to_string(),
        1,
    );
    sign_token(claims, TEST_SECRET).expect("sign user token")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("request")
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Database-backed tests only run when the environment provides a database.
pub fn db_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}
