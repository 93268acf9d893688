//! End-to-end API flow tests driving the full axum app in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use dine_server::{Config, ServerState};

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

async fn test_app() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.jwt.secret = TEST_SECRET.to_string();
    let state = ServerState::initialize(&config).await;
    let app = dine_server::api::build_app(&state).with_state(state);
    (app, tmp)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("token", token);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn signup(app: &Router, email: &str, phone: &str) -> (StatusCode, Value) {
    send(
        app,
        request(
            "POST",
            "/users/signup",
            None,
            Some(json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": email,
                "phone": phone,
                "password": "hunter42",
            })),
        ),
    )
    .await
}

/// Signup and return a usable access token
async fn signup_token(app: &Router, email: &str, phone: &str) -> String {
    let (status, body) = signup(app, email, phone).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_menu(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/menus",
            Some(token),
            Some(json!({"name": name, "category": "dinner"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_food(app: &Router, token: &str, menu_id: &str, name: &str, price: f64) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/foods",
            Some(token),
            Some(json!({
                "name": name,
                "price": price,
                "food_image": "https://images.example.com/food.jpg",
                "menu_id": menu_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_table(app: &Router, token: &str, table_number: i32) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/tables",
            Some(token),
            Some(json!({"table_number": table_number, "number_of_guests": 4})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn signup_rejects_duplicate_email_or_phone() {
    let (app, _tmp) = test_app().await;

    let (status, body) = signup(&app, "jane@example.com", "5550000001").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["refresh_token"].is_string());
    // password hash never leaves the server
    assert!(body.get("hash_pass").is_none());

    // same email, different phone
    let (status, _) = signup(&app, "jane@example.com", "5550000002").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // different email, same phone
    let (status, _) = signup(&app, "jane2@example.com", "5550000001").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_verifies_password_and_reissues_tokens() {
    let (app, _tmp) = test_app().await;
    signup(&app, "jane@example.com", "5550000001").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/users/login",
            None,
            Some(json!({"email": "jane@example.com", "password": "wrong-password"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/users/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "hunter42"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/users/login",
            None,
            Some(json!({"email": "jane@example.com", "password": "hunter42"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (app, _tmp) = test_app().await;

    let (status, body) = send(&app, request("GET", "/menus", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send(&app, request("GET", "/menus", Some("garbage"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");

    // health stays public
    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let token = signup_token(&app, "jane@example.com", "5550000001").await;
    let (status, _) = send(&app, request("GET", "/menus", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn menu_window_validation_and_partial_patch() {
    let (app, _tmp) = test_app().await;
    let token = signup_token(&app, "jane@example.com", "5550000001").await;
    let menu_id = create_menu(&app, &token, "Lunch Specials").await;
    let uri = format!("/menus/{menu_id}");

    // window starting in the past
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({
                "start_date": "2000-01-01T00:00:00Z",
                "end_date": "2999-01-01T00:00:00Z",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // start after end
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({
                "start_date": "2999-06-01T00:00:00Z",
                "end_date": "2999-01-01T00:00:00Z",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // valid future window
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({
                "start_date": "2999-01-01T00:00:00Z",
                "end_date": "2999-06-01T00:00:00Z",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["start_date"].is_string());

    // partial patch: only name changes, everything else survives
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({"name": "Dinner Specials"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dinner Specials");
    assert_eq!(body["category"], "dinner");
    assert!(body["start_date"].is_string());
}

#[tokio::test]
async fn food_requires_menu_and_rounds_price() {
    let (app, _tmp) = test_app().await;
    let token = signup_token(&app, "jane@example.com", "5550000001").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/foods",
            Some(&token),
            Some(json!({
                "name": "Pad Thai",
                "price": 9.50,
                "food_image": "https://images.example.com/pad-thai.jpg",
                "menu_id": "menu:doesnotexist",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let menu_id = create_menu(&app, &token, "Thai").await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/foods",
            Some(&token),
            Some(json!({
                "name": "Pad Thai",
                "price": 9.994,
                "food_image": "https://images.example.com/pad-thai.jpg",
                "menu_id": menu_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let price = body["price"].as_f64().unwrap();
    assert!((price - 9.99).abs() < 1e-9, "price was {price}");

    // negative price rejected
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/foods",
            Some(&token),
            Some(json!({
                "name": "Free Lunch",
                "price": -1.0,
                "food_image": "https://images.example.com/free.jpg",
                "menu_id": menu_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_and_invoice_defaults() {
    let (app, _tmp) = test_app().await;
    let token = signup_token(&app, "jane@example.com", "5550000001").await;
    let table_id = create_table(&app, &token, 7).await;

    // order against a missing table is rejected
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/orders",
            Some(&token),
            Some(json!({
                "order_date": "2026-08-08T12:00:00Z",
                "table_id": "dining_table:doesnotexist",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/orders",
            Some(&token),
            Some(json!({
                "order_date": "2026-08-08T12:00:00Z",
                "table_id": table_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/invoices",
            Some(&token),
            Some(json!({"order_id": order_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "PENDING");
    let created_at = body["created_at"].as_str().unwrap();
    let due = body["payment_due_date"].as_str().unwrap();
    assert!(due > created_at);
    let invoice_id = body["id"].as_str().unwrap().to_string();

    // patch only payment fields
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/invoices/{invoice_id}"),
            Some(&token),
            Some(json!({"payment_status": "PAID", "payment_method": "CASH"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_status"], "PAID");
    assert_eq!(body["payment_method"], "CASH");
    assert_eq!(body["order_id"], order_id);
}

#[tokio::test]
async fn order_item_pack_and_invoice_view() {
    let (app, _tmp) = test_app().await;
    let token = signup_token(&app, "jane@example.com", "5550000001").await;
    let menu_id = create_menu(&app, &token, "Thai").await;
    let food1 = create_food(&app, &token, &menu_id, "Pad Thai", 5.50).await;
    let food2 = create_food(&app, &token, &menu_id, "Spring Rolls", 2.25).await;
    let table_id = create_table(&app, &token, 3).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/order-items",
            Some(&token),
            Some(json!({
                "table_id": table_id,
                "order_items": [
                    {"food_id": food1, "quantity": 2},
                    {"food_id": food2, "quantity": 1},
                ],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let order_id = items[0]["order_id"].as_str().unwrap().to_string();
    assert_eq!(items[1]["order_id"], order_id);

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/order-items/order/{order_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/invoices",
            Some(&token),
            Some(json!({"order_id": order_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let invoice_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/invoices/{invoice_id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let due = body["payment_due"].as_f64().unwrap();
    assert!((due - 13.25).abs() < 1e-9, "payment_due was {due}");
    assert_eq!(body["table_number"], 3);
    assert_eq!(body["order_details"].as_array().unwrap().len(), 2);

    // empty pack is rejected
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/order-items",
            Some(&token),
            Some(json!({"table_id": table_id, "order_items": []})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_listing_is_paginated() {
    let (app, _tmp) = test_app().await;
    let token = signup_token(&app, "jane@example.com", "5550000001").await;
    signup(&app, "john@example.com", "5550000002").await;
    signup(&app, "jim@example.com", "5550000003").await;

    let (status, body) = send(&app, request("GET", "/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["user_items"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        request(
            "GET",
            "/users?recordPerPage=2&page=2",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["user_items"].as_array().unwrap().len(), 1);
}
