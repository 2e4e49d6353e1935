mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{register_and_login, send, test_app};

#[tokio::test]
async fn register_login_and_me() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "password": "secret123",
            "email": "alice@example.com",
            "nickname": "Alice"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["status"], 1);
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 24 * 3600);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["nickname"], "Alice");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;
    register_and_login(&app, "bob").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "another1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1005);
    assert_eq!(body["message"], "username already exists");
}

#[tokio::test]
async fn login_failures_look_identical() {
    let app = test_app().await;
    register_and_login(&app, "carol").await;

    let (s1, b1) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "nobody", "password": "whatever" })),
    )
    .await;
    let (s2, b2) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "carol", "password": "wrongpass" })),
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s1, s2);
    assert_eq!(b1, b2);
    assert_eq!(b1["message"], "username or password incorrect");
}

#[tokio::test]
async fn disabled_account_is_forbidden_only_with_right_password() {
    let app = test_app().await;
    let token = register_and_login(&app, "dave").await;

    let (_, me) = send(&app, "GET", "/api/v1/auth/me", Some(&token), None).await;
    let id = me["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/users/{id}"),
        Some(&token),
        Some(json!({ "status": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "dave", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "account disabled");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "dave", "password": "wrongpass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_reissues_and_rejects_garbage() {
    let app = test_app().await;
    let token = register_and_login(&app, "erin").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/api/v1/auth/me", Some(&fresh), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "token": "not.a.jwt" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1006);
}

#[tokio::test]
async fn validation_errors_are_invalid_param() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "ab", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("password"));
    assert!(message.contains("username"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "frank", "password": "secret123", "email": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = send(&app, "GET", "/api/v1/powers", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1006);
}
