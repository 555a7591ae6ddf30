//! Chat group API integration tests

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::assertions::assert_message;
use crate::common::fakes::{RecordingChat, RecordingMedia, UPLOADED_URL};
use crate::common::{as_user, register_unique_user, test_server, test_state};
use shuvomedia::backend::integrations::GROUP_FOLDER;
use shuvomedia::shared::social::{GroupResponse, ListGroupsResponse, DEFAULT_GROUP_IMAGE};

#[tokio::test]
async fn test_create_group_adds_creator_and_opens_channel() {
    let chat = Arc::new(RecordingChat::default());
    let server = test_server(test_state().with_chat(chat.clone()));
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;

    let response = as_user(server.post("/api/chats/groups"), &ana)
        .json(&json!({ "name": "Study Group", "members": [ben.id] }))
        .await;

    assert_message(&response, StatusCode::CREATED, "Group created successfully");
    let body: GroupResponse = response.json();
    assert_eq!(body.group.name, "Study Group");
    assert_eq!(body.group.image, DEFAULT_GROUP_IMAGE);
    assert_eq!(body.group.created_by, ana.id);
    let members: Vec<Uuid> = body.group.members.iter().map(|m| m.id).collect();
    assert_eq!(members, vec![ben.id, ana.id]);
    assert_eq!(body.group.members[0].full_name, "Ben");

    let channels = chat.channels.lock().unwrap();
    assert_eq!(
        *channels,
        vec![(body.group.id, "Study Group".to_string(), vec![ben.id, ana.id], ana.id)]
    );
}

#[tokio::test]
async fn test_create_group_requires_members() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.post("/api/chats/groups"), &ana)
        .json(&json!({ "name": "Lonely", "members": [] }))
        .await;

    assert_message(
        &response,
        StatusCode::BAD_REQUEST,
        "Group name and at least one member are required",
    );
}

#[tokio::test]
async fn test_create_group_rejects_unknown_members() {
    let chat = Arc::new(RecordingChat::default());
    let server = test_server(test_state().with_chat(chat.clone()));
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.post("/api/chats/groups"), &ana)
        .json(&json!({ "name": "Ghosts", "members": [Uuid::new_v4()] }))
        .await;

    assert_message(
        &response,
        StatusCode::BAD_REQUEST,
        "One or more member IDs are invalid",
    );
    assert!(chat.channels.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_group_with_image_upload() {
    let media = Arc::new(RecordingMedia::default());
    let server = test_server(test_state().with_media(media.clone()));
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;

    let form = MultipartForm::new()
        .add_text("name", "Photo Club")
        .add_text("members", json!([ben.id]).to_string())
        .add_part(
            "image",
            Part::bytes(b"GIF89a".to_vec())
                .file_name("club.gif")
                .mime_type("image/gif"),
        );

    let response = as_user(server.post("/api/chats/groups"), &ana)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: GroupResponse = response.json();
    assert_eq!(body.group.image, UPLOADED_URL);
    let uploads = media.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, GROUP_FOLDER);
}

#[tokio::test]
async fn test_list_groups_for_member() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;
    let cara = register_unique_user(&server, "Cara").await;

    as_user(server.post("/api/chats/groups"), &ana)
        .json(&json!({ "name": "Ana and Ben", "members": [ben.id] }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = as_user(server.get("/api/chats/groups"), &ben).await;
    assert_message(&response, StatusCode::OK, "Groups retrieved successfully");
    let body: ListGroupsResponse = response.json();
    assert_eq!(body.groups.len(), 1);
    assert_eq!(body.groups[0].name, "Ana and Ben");

    let response = as_user(server.get("/api/chats/groups"), &cara).await;
    let body: ListGroupsResponse = response.json();
    assert!(body.groups.is_empty());
}

#[tokio::test]
async fn test_update_group_rules() {
    let chat = Arc::new(RecordingChat::default());
    let server = test_server(test_state().with_chat(chat.clone()));
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;

    let created = as_user(server.post("/api/chats/groups"), &ana)
        .json(&json!({ "name": "Study", "members": [ben.id] }))
        .await;
    let group: GroupResponse = created.json();
    let path = format!("/api/chats/groups/{}", group.group.id);

    let response = as_user(server.patch(&path), &ben)
        .json(&json!({ "name": "Ben's now" }))
        .await;
    assert_message(
        &response,
        StatusCode::FORBIDDEN,
        "Only the group creator can update the group",
    );

    let response = as_user(server.patch(&path), &ana).json(&json!({})).await;
    assert_message(
        &response,
        StatusCode::BAD_REQUEST,
        "At least one field must be provided to update",
    );

    let response = as_user(server.patch(&path), &ana)
        .json(&json!({ "name": "Exam Prep" }))
        .await;
    assert_message(&response, StatusCode::OK, "Group updated successfully");
    let body: GroupResponse = response.json();
    assert_eq!(body.group.name, "Exam Prep");
    assert_eq!(body.group.members.len(), 2);

    assert_eq!(
        *chat.renames.lock().unwrap(),
        vec![(group.group.id, "Exam Prep".to_string())]
    );
}

#[tokio::test]
async fn test_update_unknown_group() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.patch(&format!("/api/chats/groups/{}", Uuid::new_v4())), &ana)
        .json(&json!({ "name": "Nobody's" }))
        .await;

    assert_message(&response, StatusCode::NOT_FOUND, "Group not found");
}

#[tokio::test]
async fn test_groups_require_session() {
    let server = test_server(test_state());

    let response = server.get("/api/chats/groups").await;

    assert_message(&response, StatusCode::UNAUTHORIZED, "Unauthorized: No token provided");
}
