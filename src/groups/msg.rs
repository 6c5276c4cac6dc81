use serde::Serialize;
use sqlx::SqlitePool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{AppError, AppResult};

/// A persisted group message joined with its sender's profile. This is both
/// the API record returned on send/list and the event published on the live
/// update channel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub id: Uuid,
    pub group_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub content: String,
    /// RFC 3339, server-assigned. Per-group ordering key.
    pub created_at: String,
}

/// Fallback chain the UI relies on: username, then the mailbox half of the
/// email, then "Anonymous".
pub fn display_name(username: Option<String>, email: Option<String>) -> String {
    username
        .filter(|u| !u.is_empty())
        .or_else(|| email.and_then(|e| e.split('@').next().map(str::to_owned)))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Anonymous".to_owned())
}

/// Persists a message and publishes it to live subscribers. The record is
/// only broadcast after the insert succeeds, so subscribers never see a
/// message that failed to persist.
pub async fn send_msg(
    db_pool: &SqlitePool,
    tx: &broadcast::Sender<GroupMessage>,

    group_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> AppResult<GroupMessage> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Message content is required".to_owned()));
    }

    let id = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::Upstream(err.into()))?;

    sqlx::query("INSERT INTO group_messages (id, group_id, user_id, content, created_at) VALUES (?,?,?,?,?)")
        .bind(id.to_string())
        .bind(group_id.to_string())
        .bind(sender_id.to_string())
        .bind(content)
        .bind(&created_at)
        .execute(db_pool)
        .await?;

    let profile: Option<(Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as("SELECT username, avatar_url, email FROM profiles WHERE id=?")
            .bind(sender_id.to_string())
            .fetch_optional(db_pool)
            .await?;
    let (username, avatar_url, email) = profile.unwrap_or((None, None, None));

    let message = GroupMessage {
        id,
        group_id,
        sender_id,
        sender_name: display_name(username, email),
        sender_avatar: avatar_url,
        content: content.to_owned(),
        created_at,
    };

    // No subscribers is fine.
    let _ = tx.send(message.clone());

    Ok(message)
}

/// The most recent `limit` messages of a group, oldest first.
pub async fn recent_messages(
    db_pool: &SqlitePool,
    group_id: Uuid,
    limit: i64,
) -> AppResult<Vec<GroupMessage>> {
    let rows: Vec<(String, String, String, String, Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as(
            "SELECT m.id, m.user_id, m.content, m.created_at, p.username, p.avatar_url, p.email
             FROM group_messages m
             LEFT JOIN profiles p ON p.id = m.user_id
             WHERE m.group_id = ?
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ?",
        )
        .bind(group_id.to_string())
        .bind(limit)
        .fetch_all(db_pool)
        .await?;

    let mut messages = Vec::with_capacity(rows.len());
    for (id, user_id, content, created_at, username, avatar_url, email) in rows {
        messages.push(GroupMessage {
            id: Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?,
            group_id,
            sender_id: Uuid::parse_str(&user_id).map_err(|err| AppError::Upstream(err.into()))?,
            sender_name: display_name(username, email),
            sender_avatar: avatar_url,
            content,
            created_at,
        });
    }
    messages.reverse();
    Ok(messages)
}
