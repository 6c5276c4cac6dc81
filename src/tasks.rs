pub mod assistant;

use axum::{
    debug_handler,
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{task_id}", patch(set_completed).delete(delete_task))
        .route("/ai-assistant", post(assistant::ai_assistant))
}

/// A persisted task, scoped to its owner. Every mutation requires the
/// owner's id so one user cannot touch another's tasks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    category: String,
    priority: String,
    deadline: Option<String>,
    completed: bool,
    created_at: String,
}

type TaskRow = (String, String, String, String, String, String, Option<String>, bool, String);

impl TaskRecord {
    fn from_row(row: TaskRow) -> AppResult<TaskRecord> {
        let (id, user_id, title, description, category, priority, deadline, completed, created_at) =
            row;
        Ok(TaskRecord {
            id: Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?,
            user_id: Uuid::parse_str(&user_id).map_err(|err| AppError::Upstream(err.into()))?,
            title,
            description,
            category,
            priority,
            deadline,
            completed,
            created_at,
        })
    }
}

#[derive(Deserialize)]
struct TasksQuery {
    user_id: Uuid,
}

/// `GET /api/tasks?user_id=` — the caller's tasks, newest first.
#[debug_handler(state = AppState)]
async fn list_tasks(
    State(db_pool): State<SqlitePool>,
    Query(TasksQuery { user_id }): Query<TasksQuery>,
) -> AppResult<Json<Vec<TaskRecord>>> {
    let rows: Vec<TaskRow> = sqlx::query_as(
        "SELECT id, user_id, title, description, category, priority, deadline, completed, created_at
         FROM tasks WHERE user_id = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        tasks.push(TaskRecord::from_row(row)?);
    }
    Ok(Json(tasks))
}

fn default_priority() -> String {
    "medium".to_owned()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest {
    user_id: Uuid,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default = "default_priority")]
    priority: String,
    #[serde(default)]
    deadline: Option<String>,
}

/// `POST /api/tasks` — stores a new pending task and returns the record.
#[debug_handler(state = AppState)]
async fn create_task(
    State(db_pool): State<SqlitePool>,
    Json(request): Json<CreateTaskRequest>,
) -> AppResult<Json<TaskRecord>> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_owned()));
    }

    let id = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::Upstream(err.into()))?;

    sqlx::query(
        "INSERT INTO tasks (id, user_id, title, description, category, priority, deadline, completed, created_at)
         VALUES (?,?,?,?,?,?,?,0,?)",
    )
    .bind(id.to_string())
    .bind(request.user_id.to_string())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.category)
    .bind(&request.priority)
    .bind(&request.deadline)
    .bind(&created_at)
    .execute(&db_pool)
    .await?;

    Ok(Json(TaskRecord {
        id,
        user_id: request.user_id,
        title: request.title,
        description: request.description,
        category: request.category,
        priority: request.priority,
        deadline: request.deadline,
        completed: false,
        created_at,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetCompletedRequest {
    user_id: Uuid,
    completed: bool,
}

/// `PATCH /api/tasks/{task_id}` — flips the completion flag.
#[debug_handler(state = AppState)]
async fn set_completed(
    State(db_pool): State<SqlitePool>,
    Path(task_id): Path<Uuid>,
    Json(request): Json<SetCompletedRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ? AND user_id = ?")
        .bind(request.completed)
        .bind(task_id.to_string())
        .bind(request.user_id.to_string())
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".to_owned()));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /api/tasks/{task_id}?user_id=`
#[debug_handler(state = AppState)]
async fn delete_task(
    State(db_pool): State<SqlitePool>,
    Path(task_id): Path<Uuid>,
    Query(TasksQuery { user_id }): Query<TasksQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(task_id.to_string())
        .bind(user_id.to_string())
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".to_owned()));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}
