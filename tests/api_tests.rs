//! API-level tests over an in-memory database. AI-backed paths are only
//! exercised up to their pre-call validation so no network is involved.

use std::time::Duration;

use aicampus::{ai::AiClients, build_router, db, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use futures_util::StreamExt;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tokio::{sync::broadcast, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

async fn setup() -> (axum::Router, SqlitePool) {
    // A single connection keeps every query on the same in-memory database.
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    db::init(&db_pool).await.expect("schema init");

    let router = build_router(AppState {
        db_pool: db_pool.clone(),
        ai: AiClients::from_env(),
        tx: broadcast::channel(16).0,
    });
    (router, db_pool)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_profile(router: &axum::Router, user_id: Uuid, username: &str, minat: &str) {
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/profile",
            json!({
                "userId": user_id,
                "username": username,
                "email": format!("{username}@kampus.ac.id"),
                "minat": minat,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn event_catalog_dump_lists_every_event() {
    let (router, _db) = setup().await;

    let response = router.oneshot(get("/api/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 10);
    assert_eq!(body["events"].as_array().unwrap().len(), 10);
    assert_eq!(body["events"][0]["id"], 1);
    assert!(body["events"][0]["registrationLink"].is_string());
}

#[tokio::test]
async fn recommendations_require_interests() {
    let (router, _db) = setup().await;

    let response = router
        .oneshot(post_json("/api/events", json!({ "interests": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Interests array is required");
}

#[tokio::test]
async fn chat_endpoints_reject_empty_message_before_any_call() {
    let (router, _db) = setup().await;

    for uri in ["/api/chat", "/api/chat/campus", "/api/chat/general", "/api/chat/aicampus"] {
        let response = router
            .clone()
            .oneshot(post_json(uri, json!({ "message": "", "history": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["error"], "Message is required", "{uri}");
    }
}

#[tokio::test]
async fn profile_roundtrip() {
    let (router, _db) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "budi", "suka coding").await;

    let response = router
        .clone()
        .oneshot(get(&format!("/api/profile/{user_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "budi");
    assert_eq!(body["minat"], "suka coding");

    let missing = router
        .oneshot(get(&format!("/api/profile/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn join_is_idempotent_and_membership_only_grows() {
    let (router, db_pool) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "siti", "coding dan penelitian").await;

    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(post_json("/api/groups/join", json!({ "userId": user_id })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["joined"], json!(["teknologi", "akademik"]));
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE user_id=?")
        .bind(user_id.to_string())
        .fetch_one(&db_pool)
        .await
        .unwrap();
    assert_eq!(count, 2, "second join must not duplicate membership rows");
}

#[tokio::test]
async fn join_without_interests_is_rejected() {
    let (router, _db) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "andi", "   ").await;

    let response = router
        .oneshot(post_json("/api/groups/join", json!({ "userId": user_id })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn group_listing_includes_members_and_messages_oldest_first() {
    let (router, _db) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "dewi", "machine learning").await;
    router
        .clone()
        .oneshot(post_json("/api/groups/join", json!({ "userId": user_id })))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(get(&format!("/api/groups?user_id={user_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let groups = body_json(response).await;
    let group = &groups.as_array().unwrap()[0];
    assert_eq!(group["interest"], "teknologi");
    assert_eq!(group["memberCount"], 1);
    assert_eq!(group["members"][0]["name"], "dewi");
    let group_id = group["id"].as_str().unwrap().to_owned();

    for text in ["pertama", "kedua", "ketiga"] {
        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/groups/{group_id}/messages"),
                json!({ "userId": user_id, "content": text }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let message = body_json(response).await;
        assert_eq!(message["content"], text);
        assert_eq!(message["senderName"], "dewi");
        assert!(message["id"].is_string());
        assert!(message["createdAt"].is_string());
    }

    let response = router
        .oneshot(get(&format!("/api/groups?user_id={user_id}")))
        .await
        .unwrap();
    let groups = body_json(response).await;
    let messages = groups[0]["messages"].as_array().unwrap().clone();
    let contents: Vec<&str> = messages.iter().map(|m| m["content"].as_str().unwrap()).collect();
    assert_eq!(contents, ["pertama", "kedua", "ketiga"]);
    assert_eq!(groups[0]["lastMessage"], "ketiga");
}

#[tokio::test]
async fn blank_message_is_rejected_without_store_mutation() {
    let (router, db_pool) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "rina", "futsal").await;
    router
        .clone()
        .oneshot(post_json("/api/groups/join", json!({ "userId": user_id })))
        .await
        .unwrap();

    let (group_id,): (String,) =
        sqlx::query_as("SELECT id FROM interest_groups WHERE interest_category='olahraga'")
            .fetch_one(&db_pool)
            .await
            .unwrap();

    let response = router
        .oneshot(post_json(
            &format!("/api/groups/{group_id}/messages"),
            json!({ "userId": user_id, "content": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_messages")
        .fetch_one(&db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn sending_to_unknown_group_is_not_found() {
    let (router, _db) = setup().await;

    let response = router
        .oneshot(post_json(
            &format!("/api/groups/{}/messages", Uuid::now_v7()),
            json!({ "userId": Uuid::now_v7(), "content": "halo" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn live_updates_reach_only_the_subscribed_group() {
    let (router, db_pool) = setup().await;
    let user_id = Uuid::now_v7();
    create_profile(&router, user_id, "tono", "coding dan futsal").await;
    router
        .clone()
        .oneshot(post_json("/api/groups/join", json!({ "userId": user_id })))
        .await
        .unwrap();

    let (tech_id,): (String,) =
        sqlx::query_as("SELECT id FROM interest_groups WHERE interest_category='teknologi'")
            .fetch_one(&db_pool)
            .await
            .unwrap();
    let (sport_id,): (String,) =
        sqlx::query_as("SELECT id FROM interest_groups WHERE interest_category='olahraga'")
            .fetch_one(&db_pool)
            .await
            .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router.clone();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let denied = connect_async(format!("ws://{addr}/api/groups/{}/ws", Uuid::now_v7())).await;
    assert!(denied.is_err(), "unknown group must refuse the upgrade");

    let (mut tech_socket, _) =
        connect_async(format!("ws://{addr}/api/groups/{tech_id}/ws")).await.unwrap();
    let (mut sport_socket, _) =
        connect_async(format!("ws://{addr}/api/groups/{sport_id}/ws")).await.unwrap();
    // Let both subscriptions attach before publishing.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = router
        .oneshot(post_json(
            &format!("/api/groups/{tech_id}/messages"),
            json!({ "userId": user_id, "content": "halo teknologi" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let frame = timeout(Duration::from_secs(2), tech_socket.next())
        .await
        .expect("a live event")
        .expect("an open socket")
        .unwrap();
    let WsMessage::Text(payload) = frame else { panic!("expected a text frame") };
    let event: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(event["groupId"], tech_id);
    assert_eq!(event["senderId"], user_id.to_string());
    assert_eq!(event["senderName"], "tono");
    assert_eq!(event["content"], "halo teknologi");

    let quiet = timeout(Duration::from_millis(300), sport_socket.next()).await;
    assert!(quiet.is_err(), "the other group's subscriber must not see the event");
}

#[tokio::test]
async fn task_store_roundtrip() {
    let (router, _db) = setup().await;
    let user_id = Uuid::now_v7();

    let response = router
        .clone()
        .oneshot(post_json("/api/tasks", json!({ "userId": user_id, "title": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Title is required");

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/tasks",
            json!({
                "userId": user_id,
                "title": "Laporan KKN",
                "category": "KKN",
                "priority": "high",
                "deadline": "2026-09-10",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["completed"], false);
    assert_eq!(created["priority"], "high");
    let task_id = created["id"].as_str().unwrap().to_owned();

    router
        .clone()
        .oneshot(post_json("/api/tasks", json!({ "userId": user_id, "title": "Esai Etika" })))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(get(&format!("/api/tasks?user_id={user_id}")))
        .await
        .unwrap();
    let tasks = body_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);

    let response = router
        .clone()
        .oneshot(patch_json(
            &format!("/api/tasks/{task_id}"),
            json!({ "userId": user_id, "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get(&format!("/api/tasks?user_id={user_id}")))
        .await
        .unwrap();
    let tasks = body_json(response).await;
    let toggled = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == task_id)
        .unwrap();
    assert_eq!(toggled["completed"], true);

    // Mutations are owner-scoped.
    let response = router
        .clone()
        .oneshot(delete(&format!("/api/tasks/{task_id}?user_id={}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .clone()
        .oneshot(delete(&format!("/api/tasks/{task_id}?user_id={user_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get(&format!("/api/tasks?user_id={user_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn collaboration_board_application_flow() {
    let (router, _db) = setup().await;
    let initiator = Uuid::now_v7();
    let applicant = Uuid::now_v7();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/projects",
            json!({
                "userId": initiator,
                "title": "Aplikasi KKN Desa",
                "description": "Butuh tim kecil",
                "deadline": "2026-10-01",
                "roles": [
                    { "name": "Backend", "requiredCount": 2 },
                    { "name": "Desainer" },
                ],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let project = body_json(response).await;
    assert_eq!(project["status"], "open");
    assert_eq!(project["progress"], 0);
    let project_id = project["id"].as_str().unwrap().to_owned();
    let roles = project["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 2);
    let backend = roles.iter().find(|r| r["name"] == "Backend").unwrap();
    assert_eq!(backend["requiredCount"], 2);
    assert_eq!(backend["filledCount"], 0);
    let role_id = backend["id"].as_str().unwrap().to_owned();

    let response = router.clone().oneshot(get("/api/projects?status=open")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let apply_body = json!({
        "userId": applicant,
        "roleId": role_id,
        "message": "Saya bisa Rust",
    });
    let response = router
        .clone()
        .oneshot(post_json(&format!("/api/projects/{project_id}/applications"), apply_body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let application = body_json(response).await;
    assert_eq!(application["status"], "pending");
    let application_id = application["id"].as_str().unwrap().to_owned();

    let duplicate = router
        .clone()
        .oneshot(post_json(&format!("/api/projects/{project_id}/applications"), apply_body))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    // Only the initiator decides applications.
    let response = router
        .clone()
        .oneshot(patch_json(
            &format!("/api/projects/applications/{application_id}"),
            json!({ "userId": applicant, "status": "accepted" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .clone()
        .oneshot(patch_json(
            &format!("/api/projects/applications/{application_id}"),
            json!({ "userId": initiator, "status": "accepted" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get(&format!("/api/projects/applications?user_id={applicant}")))
        .await
        .unwrap();
    let applications = body_json(response).await;
    assert_eq!(applications[0]["status"], "accepted");
    assert_eq!(applications[0]["roleName"], "Backend");

    let response = router.clone().oneshot(get("/api/projects")).await.unwrap();
    let projects = body_json(response).await;
    let backend = projects[0]["roles"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "Backend")
        .unwrap();
    assert_eq!(backend["filledCount"], 1);

    // Progress and status updates are initiator-only, progress is clamped.
    let response = router
        .clone()
        .oneshot(patch_json(
            &format!("/api/projects/{project_id}"),
            json!({ "userId": applicant, "progress": 50 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .clone()
        .oneshot(patch_json(
            &format!("/api/projects/{project_id}"),
            json!({ "userId": initiator, "progress": 150, "status": "in_progress" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.oneshot(get("/api/projects?status=in_progress")).await.unwrap();
    let projects = body_json(response).await;
    assert_eq!(projects[0]["progress"], 100);
}

#[tokio::test]
async fn task_assistant_rejects_non_array_tasks_with_the_api_error_shape() {
    let (router, _db) = setup().await;

    let response = router
        .oneshot(post_json(
            "/api/tasks/ai-assistant",
            json!({ "tasks": "not-a-list", "analysisType": "prioritize" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid tasks data");
}

#[tokio::test]
async fn task_assistant_validates_before_calling_the_provider() {
    let (router, _db) = setup().await;

    // Missing tasks array
    let response = router
        .clone()
        .oneshot(post_json("/api/tasks/ai-assistant", json!({ "analysisType": "prioritize" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid tasks data");

    // Unknown analysis type
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/tasks/ai-assistant",
            json!({ "tasks": [{ "title": "t", "completed": false }], "analysisType": "rank" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing pending short-circuits with the canned message
    let response = router
        .oneshot(post_json(
            "/api/tasks/ai-assistant",
            json!({ "tasks": [{ "title": "t", "completed": true }], "analysisType": "prioritize" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["response"].as_str().unwrap().contains("Selamat"));
}
