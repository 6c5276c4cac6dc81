pub mod membership;
pub mod msg;
mod ws;

use axum::{
    debug_handler,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    interests::{classify, InterestTag},
    AppError, AppResult, AppState,
};

use self::msg::{display_name, GroupMessage};

/// Window of history loaded with each group.
const RECENT_MESSAGES: i64 = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_groups))
        .route("/join", post(join_groups))
        .route("/{group_id}/messages", post(send_message))
        .route("/{group_id}/ws", get(ws::group_ws))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest {
    user_id: Uuid,
}

#[derive(Serialize)]
struct JoinResponse {
    joined: Vec<InterestTag>,
}

/// `POST /api/groups/join` — classify the caller's stored interests and
/// enroll them in every matching group. Idempotent; the UI calls it on
/// every visit to the chat feature.
#[debug_handler(state = AppState)]
async fn join_groups(
    State(db_pool): State<SqlitePool>,
    Json(JoinRequest { user_id }): Json<JoinRequest>,
) -> AppResult<Json<JoinResponse>> {
    let minat: Option<(String,)> = sqlx::query_as("SELECT minat FROM user_data WHERE user_id=?")
        .bind(user_id.to_string())
        .fetch_optional(&db_pool)
        .await?;

    let Some((minat,)) = minat.filter(|(m,)| !m.trim().is_empty()) else {
        return Err(AppError::BadRequest(
            "Silakan isi minat kamu di profil untuk menggunakan Peer Connect!".to_owned(),
        ));
    };

    let joined = membership::auto_join(&db_pool, user_id, &minat).await?;
    Ok(Json(JoinResponse { joined }))
}

#[derive(Deserialize)]
struct GroupsQuery {
    user_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupView {
    id: Uuid,
    name: String,
    interest: String,
    description: String,
    member_count: usize,
    members: Vec<Member>,
    last_message: Option<String>,
    last_message_time: Option<String>,
    messages: Vec<GroupMessage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Member {
    id: Uuid,
    name: String,
    avatar: Option<String>,
    interests: Vec<InterestTag>,
    online: bool,
}

/// `GET /api/groups?user_id=` — the caller's groups, each enriched with its
/// member list and the most recent messages oldest-to-newest.
#[debug_handler(state = AppState)]
async fn list_groups(
    State(db_pool): State<SqlitePool>,
    Query(GroupsQuery { user_id }): Query<GroupsQuery>,
) -> AppResult<Json<Vec<GroupView>>> {
    let groups: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT g.id, g.name, g.interest_category, g.description
         FROM group_members m
         JOIN interest_groups g ON g.id = m.group_id
         WHERE m.user_id = ?",
    )
    .bind(user_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut views = Vec::with_capacity(groups.len());
    for (id, name, interest, description) in groups {
        let group_id = Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?;
        let members = group_members(&db_pool, group_id).await?;
        let messages = msg::recent_messages(&db_pool, group_id, RECENT_MESSAGES).await?;
        let last = messages.last();

        views.push(GroupView {
            id: group_id,
            name,
            interest,
            description,
            member_count: members.len(),
            last_message: last.map(|m| m.content.clone()),
            last_message_time: last.map(|m| m.created_at.clone()),
            members,
            messages,
        });
    }
    Ok(Json(views))
}

async fn group_members(db_pool: &SqlitePool, group_id: Uuid) -> AppResult<Vec<Member>> {
    let rows: Vec<(String, Option<String>, Option<String>, Option<String>, String)> =
        sqlx::query_as(
            "SELECT m.user_id, p.username, p.avatar_url, p.email, COALESCE(u.minat, '')
             FROM group_members m
             LEFT JOIN profiles p ON p.id = m.user_id
             LEFT JOIN user_data u ON u.user_id = m.user_id
             WHERE m.group_id = ?",
        )
        .bind(group_id.to_string())
        .fetch_all(db_pool)
        .await?;

    let mut members = Vec::with_capacity(rows.len());
    for (id, username, avatar_url, email, minat) in rows {
        members.push(Member {
            id: Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?,
            name: display_name(username, email),
            avatar: avatar_url,
            interests: classify(&minat),
            // Presence tracking is not wired up; the UI shows everyone online.
            online: true,
        });
    }
    Ok(members)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest {
    user_id: Uuid,
    #[serde(default)]
    content: String,
}

/// `POST /api/groups/{group_id}/messages` — persists the message and
/// returns the stored record. The caller renders it optimistically from
/// this response; the live channel echo is suppressed client-side by
/// sender identity.
#[debug_handler(state = AppState)]
async fn send_message(
    State(db_pool): State<SqlitePool>,
    State(tx): State<broadcast::Sender<GroupMessage>>,
    Path(group_id): Path<Uuid>,
    Json(SendMessageRequest { user_id, content }): Json<SendMessageRequest>,
) -> AppResult<Json<GroupMessage>> {
    if sqlx::query_as::<_, (String,)>("SELECT id FROM interest_groups WHERE id=?")
        .bind(group_id.to_string())
        .fetch_optional(&db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Group not found".to_owned()));
    }

    let message = msg::send_msg(&db_pool, &tx, group_id, user_id, &content).await?;
    Ok(Json(message))
}
