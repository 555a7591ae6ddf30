//! Friend graph API integration tests
//!
//! Full request lifecycles over HTTP: send, cancel, accept, reject, and the
//! list endpoints that reflect them.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::assertions::assert_message;
use crate::common::{as_user, register_unique_user, test_server, test_state, TestUser};
use shuvomedia::shared::social::{
    AcceptFriendRequestResponse, FriendRequestStatus, ListFriendRequestsResponse,
    ListFriendsResponse, ListOutgoingRequestsResponse, RecommendationsResponse,
    RejectFriendRequestResponse, SendFriendRequestResponse,
};

async fn send(server: &TestServer, from: &TestUser, to: &TestUser) -> SendFriendRequestResponse {
    let response = as_user(server.post(&format!("/api/user/friend-request/{}", to.id)), from).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

async fn friend_ids(server: &TestServer, user: &TestUser) -> Vec<Uuid> {
    let response = as_user(server.get("/api/user/friends"), user).await;
    response.assert_status_ok();
    let body: ListFriendsResponse = response.json();
    body.friends.into_iter().map(|friend| friend.id).collect()
}

#[tokio::test]
async fn test_send_and_list_requests() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;

    let sent = send(&server, &ana, &ben).await;
    assert_eq!(sent.message, "Friend request sent successfully");
    assert_eq!(sent.friend_request.sender, ana.id);
    assert_eq!(sent.friend_request.recipient, ben.id);
    assert_eq!(sent.friend_request.status, FriendRequestStatus::Pending);

    let incoming = as_user(server.get("/api/user/friend-requests"), &ben).await;
    incoming.assert_status_ok();
    let incoming: ListFriendRequestsResponse = incoming.json();
    assert_eq!(incoming.friend_requests.len(), 1);
    assert_eq!(incoming.friend_requests[0].sender.id, ana.id);
    assert_eq!(incoming.friend_requests[0].sender.full_name, "Ana");

    let outgoing = as_user(server.get("/api/user/getOutgoingFriendRequests"), &ana).await;
    outgoing.assert_status_ok();
    let outgoing: ListOutgoingRequestsResponse = outgoing.json();
    assert_eq!(outgoing.outgoing_requests.len(), 1);
    assert_eq!(outgoing.outgoing_requests[0].recipient.id, ben.id);
}

#[tokio::test]
async fn test_empty_incoming_list_message() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.get("/api/user/friend-requests"), &ana).await;

    response.assert_status_ok();
    let body: ListFriendRequestsResponse = response.json();
    assert_eq!(body.message, "No friend requests found");
    assert!(body.friend_requests.is_empty());
}

#[tokio::test]
async fn test_send_rejections() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;

    let to_self = as_user(server.post(&format!("/api/user/friend-request/{}", ana.id)), &ana).await;
    to_self.assert_status(StatusCode::BAD_REQUEST);

    let unknown = as_user(
        server.post(&format!("/api/user/friend-request/{}", Uuid::new_v4())),
        &ana,
    )
    .await;
    assert_message(&unknown, StatusCode::NOT_FOUND, "Recipient not found");

    let bad_id = as_user(server.post("/api/user/friend-request/not-a-uuid"), &ana).await;
    bad_id.assert_status(StatusCode::BAD_REQUEST);

    send(&server, &ana, &ben).await;
    let duplicate = as_user(server.post(&format!("/api/user/friend-request/{}", ben.id)), &ana).await;
    assert_message(&duplicate, StatusCode::BAD_REQUEST, "Friend request already exists");

    let reverse = as_user(server.post(&format!("/api/user/friend-request/{}", ana.id)), &ben).await;
    assert_message(&reverse, StatusCode::BAD_REQUEST, "Friend request already exists");
}

#[tokio::test]
async fn test_accept_makes_friends_both_ways() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;
    let request_id = send(&server, &ana, &ben).await.friend_request.id;

    let not_recipient = as_user(
        server.post(&format!("/api/user/accept-friend-request/{}", request_id)),
        &ana,
    )
    .await;
    not_recipient.assert_status(StatusCode::FORBIDDEN);

    let response = as_user(
        server.post(&format!("/api/user/accept-friend-request/{}", request_id)),
        &ben,
    )
    .await;
    response.assert_status_ok();
    let body: AcceptFriendRequestResponse = response.json();
    assert_eq!(body.message, "Friend request accepted successfully");
    assert_eq!(body.friend.id, ana.id);

    assert_eq!(friend_ids(&server, &ana).await, vec![ben.id]);
    assert_eq!(friend_ids(&server, &ben).await, vec![ana.id]);

    // Resolved requests disappear from both listings.
    let incoming: ListFriendRequestsResponse =
        as_user(server.get("/api/user/friend-requests"), &ben).await.json();
    assert!(incoming.friend_requests.is_empty());
    let outgoing: ListOutgoingRequestsResponse =
        as_user(server.get("/api/user/getOutgoingFriendRequests"), &ana).await.json();
    assert!(outgoing.outgoing_requests.is_empty());

    let again = as_user(server.post(&format!("/api/user/friend-request/{}", ben.id)), &ana).await;
    assert_message(&again, StatusCode::BAD_REQUEST, "User is already a friend");
}

#[tokio::test]
async fn test_cancel_only_by_sender() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;
    let request_id = send(&server, &ana, &ben).await.friend_request.id;
    let path = format!("/api/user/cancel-friend-request/{}", request_id);

    let by_recipient = as_user(server.delete(&path), &ben).await;
    assert_message(
        &by_recipient,
        StatusCode::FORBIDDEN,
        "You are not authorized to cancel this request",
    );

    let by_sender = as_user(server.delete(&path), &ana).await;
    assert_message(&by_sender, StatusCode::OK, "Friend request cancelled successfully");

    let twice = as_user(server.delete(&path), &ana).await;
    assert_message(&twice, StatusCode::NOT_FOUND, "Friend request not found");

    // The pair is free again.
    send(&server, &ben, &ana).await;
}

#[tokio::test]
async fn test_reject_returns_sender() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;
    let request_id = send(&server, &ana, &ben).await.friend_request.id;
    let path = format!("/api/user/reject-friend-request/{}", request_id);

    let by_sender = as_user(server.delete(&path), &ana).await;
    by_sender.assert_status(StatusCode::FORBIDDEN);

    let response = as_user(server.delete(&path), &ben).await;
    response.assert_status_ok();
    let body: RejectFriendRequestResponse = response.json();
    assert_eq!(body.message, "Friend request rejected successfully");
    assert_eq!(body.sender.id, ana.id);

    assert!(friend_ids(&server, &ana).await.is_empty());
    assert!(friend_ids(&server, &ben).await.is_empty());

    let accept_after = as_user(
        server.post(&format!("/api/user/accept-friend-request/{}", request_id)),
        &ben,
    )
    .await;
    accept_after.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_exclude_self_friends_and_open_requests() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;
    let ben = register_unique_user(&server, "Ben").await;
    let cleo = register_unique_user(&server, "Cleo").await;
    let dev = register_unique_user(&server, "Dev").await;
    let eve = register_unique_user(&server, "Eve").await;

    // Ben becomes a friend, Cleo has a request from Ana, Dev sent one to Ana.
    let request_id = send(&server, &ana, &ben).await.friend_request.id;
    as_user(
        server.post(&format!("/api/user/accept-friend-request/{}", request_id)),
        &ben,
    )
    .await
    .assert_status_ok();
    send(&server, &ana, &cleo).await;
    send(&server, &dev, &ana).await;

    let response = as_user(server.get("/api/user/recommendations"), &ana).await;
    response.assert_status_ok();
    let body: RecommendationsResponse = response.json();
    let ids: Vec<Uuid> = body.users.iter().map(|user| user.id).collect();
    assert_eq!(ids, vec![eve.id]);
}

#[tokio::test]
async fn test_recommendations_empty_is_ok() {
    let server = test_server(test_state());
    let ana = register_unique_user(&server, "Ana").await;

    let response = as_user(server.get("/api/user/recommendations"), &ana).await;

    response.assert_status_ok();
    let body: RecommendationsResponse = response.json();
    assert!(body.users.is_empty());
}
