//! Chat API integration tests
//!
//! Identity sync on register, login and profile update, and the chat token
//! endpoint.

use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::assert_message;
use crate::common::fakes::RecordingChat;
use crate::common::{as_user, register_unique_user, test_server, test_state};
use shuvomedia::backend::chat::token::ChatTokenResponse;

#[tokio::test]
async fn test_register_and_update_sync_identity() {
    let chat = Arc::new(RecordingChat::default());
    let server = test_server(test_state().with_chat(chat.clone()));
    let ana = register_unique_user(&server, "Ana").await;

    as_user(server.patch("/api/user/updateProfile"), &ana)
        .json(&json!({ "fullName": "Ana Lima" }))
        .await
        .assert_status_ok();

    let identities = chat.identities.lock().unwrap();
    assert_eq!(identities.len(), 2);
    assert_eq!(identities[0].0, ana.id);
    assert_eq!(identities[0].1, "Ana");
    assert_eq!(identities[1].1, "Ana Lima");
}

#[tokio::test]
async fn test_chat_failure_blocks_registration() {
    let chat = Arc::new(RecordingChat {
        fail: true,
        ..Default::default()
    });
    let server = test_server(test_state().with_chat(chat));

    let response = server
        .post("/api/user/register")
        .json(&json!({ "fullName": "Ana", "email": "ana@example.com", "password": "password123" }))
        .await;
    assert_message(&response, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");

    // No user record was left behind.
    let login = server
        .post("/api/user/login")
        .json(&json!({ "email": "ana@example.com", "password": "password123" }))
        .await;
    login.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_token_for_signed_in_user() {
    let server = test_server(test_state().with_chat(Arc::new(RecordingChat::default())));
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.get("/api/chats/token"), &ana).await;

    response.assert_status_ok();
    let body: ChatTokenResponse = response.json();
    assert_eq!(body.token, format!("chat-token-{}", ana.id));
}

#[tokio::test]
async fn test_chat_token_requires_session() {
    let server = test_server(test_state().with_chat(Arc::new(RecordingChat::default())));

    let response = server.get("/api/chats/token").await;

    assert_message(&response, StatusCode::UNAUTHORIZED, "Unauthorized: No token provided");
}

#[tokio::test]
async fn test_chat_token_without_chat_service() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.get("/api/chats/token"), &ana).await;

    assert_message(
        &response,
        StatusCode::SERVICE_UNAVAILABLE,
        "Chat service is not configured",
    );
}
