//! Authentication API integration tests
//!
//! Tests for register, login, logout and the authentication gate.

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::assert_message;
use crate::common::{auth_header, register_user, session_cookie, test_server, test_state};
use shuvomedia::backend::auth::handlers::AuthResponse;
use shuvomedia::shared::social::{RelationshipStatus, Role};

#[tokio::test]
async fn test_register_success() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/register")
        .json(&json!({
            "fullName": "Ana Lima",
            "email": "  Ana@Example.COM ",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    crate::assert_contains!(set_cookie, "HttpOnly");
    crate::assert_contains!(set_cookie, "SameSite=None");
    crate::assert_contains!(set_cookie, "Max-Age=1296000");

    let body: AuthResponse = response.json();
    assert_eq!(body.message, "User registered successfully");
    assert_eq!(body.user.email, "ana@example.com");
    assert_eq!(body.user.full_name, "Ana Lima");
    assert_eq!(body.user.bio, "Hello, I am using ShuvoMedia!");
    assert_eq!(body.user.relationship_status, RelationshipStatus::Unspecified);
    assert_eq!(body.user.role, Role::User);
    assert!(body.user.friends.is_empty());

    let raw: serde_json::Value = response.json();
    assert!(raw["user"].get("password").is_none());
    assert!(raw["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/register")
        .json(&json!({ "email": "ana@example.com", "password": "password123" }))
        .await;
    assert_message(&response, StatusCode::BAD_REQUEST, "All fields are required");

    let response = server
        .post("/api/user/register")
        .json(&json!({ "fullName": "   ", "email": "ana@example.com", "password": "password123" }))
        .await;
    assert_message(&response, StatusCode::BAD_REQUEST, "All fields are required");
}

#[tokio::test]
async fn test_register_short_password() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/register")
        .json(&json!({ "fullName": "Ana", "email": "ana@example.com", "password": "12345" }))
        .await;

    assert_message(
        &response,
        StatusCode::BAD_REQUEST,
        "Password must be at least 6 characters long",
    );
}

#[tokio::test]
async fn test_register_invalid_email() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/register")
        .json(&json!({ "fullName": "Ana", "email": "not-an-email", "password": "password123" }))
        .await;

    assert_message(&response, StatusCode::BAD_REQUEST, "Invalid email format");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = test_server(test_state());
    register_user(&server, "Ana", "ana@example.com").await;

    let response = server
        .post("/api/user/register")
        .json(&json!({ "fullName": "Other", "email": "ANA@example.com", "password": "password123" }))
        .await;

    assert_message(&response, StatusCode::BAD_REQUEST, "User already exists");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/register")
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let server = test_server(test_state());
    let user = register_user(&server, "Ana", "ana@example.com").await;

    let response = server
        .post("/api/user/login")
        .json(&json!({ "email": "ANA@example.com ", "password": &user.password }))
        .await;

    response.assert_status_ok();
    let body: AuthResponse = response.json();
    assert_eq!(body.message, "User logged in successfully");
    assert_eq!(body.user.id, user.id);

    let token = response.cookie("token").value().to_string();
    let me = server
        .get("/api/user/getMe")
        .add_header(header::COOKIE, session_cookie(&token))
        .await;
    me.assert_status_ok();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = test_server(test_state());
    register_user(&server, "Ana", "ana@example.com").await;

    let wrong_password = server
        .post("/api/user/login")
        .json(&json!({ "email": "ana@example.com", "password": "wrongpassword" }))
        .await;
    assert_message(&wrong_password, StatusCode::UNAUTHORIZED, "Invalid email or password");

    let unknown_email = server
        .post("/api/user/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    assert_message(&unknown_email, StatusCode::UNAUTHORIZED, "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let server = test_server(test_state());

    let response = server
        .post("/api/user/login")
        .json(&json!({ "email": "ana@example.com" }))
        .await;

    assert_message(&response, StatusCode::BAD_REQUEST, "Email and password are required");
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let server = test_server(test_state());

    let response = server.post("/api/user/logout").await;

    assert_message(&response, StatusCode::OK, "User logged out successfully");
    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("token=;"));
    crate::assert_contains!(set_cookie, "Max-Age=0");
}

#[tokio::test]
async fn test_gate_rejects_missing_token() {
    let server = test_server(test_state());

    let response = server.get("/api/user/getMe").await;

    assert_message(&response, StatusCode::UNAUTHORIZED, "Unauthorized: No token provided");
}

#[tokio::test]
async fn test_gate_rejects_invalid_token() {
    let server = test_server(test_state());

    let response = server
        .get("/api/user/friends")
        .add_header(header::COOKIE, session_cookie("invalid.token.here"))
        .await;

    assert_message(&response, StatusCode::UNAUTHORIZED, "Unauthorized: Invalid token");
}

#[tokio::test]
async fn test_gate_accepts_bearer_token() {
    let server = test_server(test_state());
    let user = register_user(&server, "Ana", "ana@example.com").await;

    let response = server
        .get("/api/user/getMe")
        .add_header(header::AUTHORIZATION, auth_header(&user.token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["email"], "ana@example.com");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server(test_state());

    let response = server.get("/api/user/does-not-exist").await;

    assert_message(&response, StatusCode::NOT_FOUND, "Route not found");
}
