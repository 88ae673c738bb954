//! Chat Room API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use uuid::Uuid;

use chat_manager::domain::{ChatRoomMemberRepository, ChatRoomRepository};

use crate::common::{unique_email, TestApp};

#[tokio::test]
async fn test_create_chat_room_makes_caller_owner_and_member() {
    let app = TestApp::new();
    let (user_id, token) = app.signed_up(&unique_email()).await;

    let response = app
        .server
        .post("/api/chatrooms")
        .authorization_bearer(&token)
        .json(&json!({ "name": "General" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "General");
    let room_id: Uuid = body["id"].as_str().expect("id").parse().expect("uuid");
    let owner_id: Uuid = user_id.parse().expect("uuid");

    let rooms = app.store.find_by_owner(owner_id).await.expect("rooms");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, room_id);

    let membership = app.store.find(owner_id, room_id).await.expect("lookup");
    assert!(membership.is_some_and(|m| m.left_at.is_none()));
}

#[tokio::test]
async fn test_create_chat_room_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/chatrooms")
        .json(&json!({ "name": "General" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.chat_room_row_count(), 0);
}

#[test_case(4 ; "too short")]
#[test_case(51 ; "too long")]
#[tokio::test]
async fn test_create_chat_room_rejects_name_length(len: usize) {
    let app = TestApp::new();
    let (_, token) = app.signed_up(&unique_email()).await;

    let response = app
        .server
        .post("/api/chatrooms")
        .authorization_bearer(&token)
        .json(&json!({ "name": "x".repeat(len) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(app.store.chat_room_row_count(), 0);
}

#[tokio::test]
async fn test_deleted_user_cannot_create_chat_room() {
    let app = TestApp::new();
    let (user_id, token) = app.signed_up(&unique_email()).await;
    app.server
        .delete(&format!("/api/users/{}", user_id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .post("/api/chatrooms")
        .authorization_bearer(&token)
        .json(&json!({ "name": "General" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.store.chat_room_row_count(), 0);
}
