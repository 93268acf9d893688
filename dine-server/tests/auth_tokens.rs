//! Token lifecycle tests against the full app: issue, validate, expire.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dine_server::auth::{JwtConfig, JwtService};
use dine_server::{Config, ServerState};

const TEST_SECRET: &str = "token-lifecycle-test-secret-0123456789ab";

async fn test_app() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.jwt.secret = TEST_SECRET.to_string();
    let state = ServerState::initialize(&config).await;
    let app = dine_server::api::build_app(&state).with_state(state);
    (app, tmp)
}

fn service(access_ttl_hours: i64) -> JwtService {
    JwtService::with_config(JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_ttl_hours,
        refresh_ttl_hours: 72,
    })
}

async fn get_menus(app: &Router, token: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri("/menus")
        .header("token", token)
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn freshly_issued_token_is_accepted() {
    let (app, _tmp) = test_app().await;
    let pair = service(24)
        .generate_token_pair("user:abc", "jane@example.com", "Jane", "Doe", "USER")
        .unwrap();

    let (status, _) = get_menus(&app, &pair.access_token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_token_is_rejected_with_expiry_error() {
    let (app, _tmp) = test_app().await;
    let pair = service(-2)
        .generate_token_pair("user:abc", "jane@example.com", "Jane", "Doe", "USER")
        .unwrap();

    let (status, body) = get_menus(&app, &pair.access_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3003");

    // the refresh token of the same pair outlives the access token
    let claims = service(24).validate_token(&pair.refresh_token).unwrap();
    assert_eq!(claims.token_type, "refresh");
}

#[tokio::test]
async fn token_signed_with_foreign_secret_is_rejected() {
    let (app, _tmp) = test_app().await;
    let foreign = JwtService::with_config(JwtConfig {
        secret: "some-other-secret-0123456789abcdefghij".to_string(),
        access_ttl_hours: 24,
        refresh_ttl_hours: 72,
    });
    let pair = foreign
        .generate_token_pair("user:abc", "jane@example.com", "Jane", "Doe", "USER")
        .unwrap();

    let (status, body) = get_menus(&app, &pair.access_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}
