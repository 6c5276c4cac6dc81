use axum::{
    debug_handler,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_profile))
        .route("/{user_id}", get(profile))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView {
    id: Uuid,
    username: Option<String>,
    avatar_url: Option<String>,
    email: Option<String>,
    /// Free-text interest description; the classifier derives tags from it.
    minat: String,
}

/// `GET /api/profile/{user_id}`
#[debug_handler(state = AppState)]
async fn profile(
    State(db_pool): State<SqlitePool>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ProfileView>> {
    let row: Option<(Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as("SELECT username, avatar_url, email FROM profiles WHERE id=?")
            .bind(user_id.to_string())
            .fetch_optional(&db_pool)
            .await?;

    let Some((username, avatar_url, email)) = row else {
        return Err(AppError::NotFound("Profile not found".to_owned()));
    };

    let minat: Option<(String,)> = sqlx::query_as("SELECT minat FROM user_data WHERE user_id=?")
        .bind(user_id.to_string())
        .fetch_optional(&db_pool)
        .await?;

    Ok(Json(ProfileView {
        id: user_id,
        username,
        avatar_url,
        email,
        minat: minat.map(|(m,)| m).unwrap_or_default(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertProfileRequest {
    user_id: Uuid,
    username: Option<String>,
    avatar_url: Option<String>,
    email: Option<String>,
    #[serde(default)]
    minat: String,
}

/// `POST /api/profile` — upserts the identity mirror and the free-text
/// interests the membership resolver reads. Identity itself lives in the
/// external auth system; this only stores what the chat UI displays.
#[debug_handler(state = AppState)]
async fn upsert_profile(
    State(db_pool): State<SqlitePool>,
    Json(request): Json<UpsertProfileRequest>,
) -> AppResult<Json<serde_json::Value>> {
    sqlx::query(
        "INSERT INTO profiles (id, username, avatar_url, email) VALUES (?,?,?,?)
         ON CONFLICT(id) DO UPDATE SET
            username = excluded.username,
            avatar_url = excluded.avatar_url,
            email = excluded.email",
    )
    .bind(request.user_id.to_string())
    .bind(&request.username)
    .bind(&request.avatar_url)
    .bind(&request.email)
    .execute(&db_pool)
    .await?;

    sqlx::query(
        "INSERT INTO user_data (user_id, minat) VALUES (?,?)
         ON CONFLICT(user_id) DO UPDATE SET minat = excluded.minat",
    )
    .bind(request.user_id.to_string())
    .bind(&request.minat)
    .execute(&db_pool)
    .await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
