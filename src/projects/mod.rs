//! Collaboration board: projects with open roles that other students apply
//! to. The initiator owns status, progress, and application decisions.

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

const STATUSES: [&str; 4] = ["open", "in_progress", "completed", "cancelled"];
const APPLICATION_STATUSES: [&str; 2] = ["accepted", "rejected"];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/{project_id}", patch(update_project))
        .route("/{project_id}/applications", post(apply))
        .route("/applications", get(my_applications))
        .route("/applications/{application_id}", patch(decide_application))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectView {
    id: Uuid,
    initiator_id: Uuid,
    title: String,
    description: String,
    status: String,
    deadline: Option<String>,
    progress: i64,
    created_at: String,
    roles: Vec<RoleView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoleView {
    id: Uuid,
    name: String,
    required_count: i64,
    filled_count: i64,
}

#[derive(Deserialize)]
struct ProjectsQuery {
    status: Option<String>,
}

/// `GET /api/projects?status=` — every project with its roles embedded,
/// newest first, optionally narrowed to one status.
#[debug_handler(state = AppState)]
async fn list_projects(
    State(db_pool): State<SqlitePool>,
    Query(ProjectsQuery { status }): Query<ProjectsQuery>,
) -> AppResult<Json<Vec<ProjectView>>> {
    if let Some(status) = &status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::BadRequest("Invalid status".to_owned()));
        }
    }

    let rows: Vec<(String, String, String, String, String, Option<String>, i64, String)> =
        sqlx::query_as(
            "SELECT id, initiator_id, title, description, status, deadline, progress, created_at
             FROM projects
             WHERE status = COALESCE(?, status)
             ORDER BY created_at DESC, id DESC",
        )
        .bind(&status)
        .fetch_all(&db_pool)
        .await?;

    let mut views = Vec::with_capacity(rows.len());
    for (id, initiator_id, title, description, status, deadline, progress, created_at) in rows {
        let project_id = Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?;
        views.push(ProjectView {
            id: project_id,
            initiator_id: Uuid::parse_str(&initiator_id)
                .map_err(|err| AppError::Upstream(err.into()))?,
            title,
            description,
            status,
            deadline,
            progress,
            created_at,
            roles: project_roles(&db_pool, project_id).await?,
        });
    }
    Ok(Json(views))
}

async fn project_roles(db_pool: &SqlitePool, project_id: Uuid) -> AppResult<Vec<RoleView>> {
    let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
        "SELECT id, name, required_count, filled_count
         FROM project_roles WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id.to_string())
    .fetch_all(db_pool)
    .await?;

    let mut roles = Vec::with_capacity(rows.len());
    for (id, name, required_count, filled_count) in rows {
        roles.push(RoleView {
            id: Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?,
            name,
            required_count,
            filled_count,
        });
    }
    Ok(roles)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRoleRequest {
    name: String,
    #[serde(default = "one")]
    required_count: i64,
}

fn one() -> i64 {
    1
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectRequest {
    user_id: Uuid,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    roles: Vec<CreateRoleRequest>,
}

/// `POST /api/projects` — new open project with its role slots.
#[debug_handler(state = AppState)]
async fn create_project(
    State(db_pool): State<SqlitePool>,
    Json(request): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectView>> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_owned()));
    }

    let id = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::Upstream(err.into()))?;

    sqlx::query(
        "INSERT INTO projects (id, initiator_id, title, description, status, deadline, progress, created_at)
         VALUES (?,?,?,?,'open',?,0,?)",
    )
    .bind(id.to_string())
    .bind(request.user_id.to_string())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.deadline)
    .bind(&created_at)
    .execute(&db_pool)
    .await?;

    let mut roles = Vec::with_capacity(request.roles.len());
    for role in request.roles {
        let role_id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO project_roles (id, project_id, name, required_count, filled_count)
             VALUES (?,?,?,?,0)",
        )
        .bind(role_id.to_string())
        .bind(id.to_string())
        .bind(&role.name)
        .bind(role.required_count.max(1))
        .execute(&db_pool)
        .await?;
        roles.push(RoleView {
            id: role_id,
            name: role.name,
            required_count: role.required_count.max(1),
            filled_count: 0,
        });
    }

    Ok(Json(ProjectView {
        id,
        initiator_id: request.user_id,
        title: request.title,
        description: request.description,
        status: "open".to_owned(),
        deadline: request.deadline,
        progress: 0,
        created_at,
        roles,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectRequest {
    user_id: Uuid,
    progress: Option<i64>,
    status: Option<String>,
}

/// `PATCH /api/projects/{project_id}` — initiator-only progress and status
/// updates. Progress is clamped to 0..=100.
#[debug_handler(state = AppState)]
async fn update_project(
    State(db_pool): State<SqlitePool>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(status) = &request.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::BadRequest("Invalid status".to_owned()));
        }
    }

    let result = sqlx::query(
        "UPDATE projects SET
            progress = COALESCE(?, progress),
            status = COALESCE(?, status)
         WHERE id = ? AND initiator_id = ?",
    )
    .bind(request.progress.map(|p| p.clamp(0, 100)))
    .bind(&request.status)
    .bind(project_id.to_string())
    .bind(request.user_id.to_string())
    .execute(&db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Project not found".to_owned()));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyRequest {
    user_id: Uuid,
    role_id: Uuid,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationView {
    id: Uuid,
    project_id: Uuid,
    role_id: Uuid,
    status: String,
    created_at: String,
}

/// `POST /api/projects/{project_id}/applications` — apply for a role slot.
/// One application per applicant per role.
#[debug_handler(state = AppState)]
async fn apply(
    State(db_pool): State<SqlitePool>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> AppResult<Json<ApplicationView>> {
    let role: Option<(String,)> =
        sqlx::query_as("SELECT id FROM project_roles WHERE id = ? AND project_id = ?")
            .bind(request.role_id.to_string())
            .bind(project_id.to_string())
            .fetch_optional(&db_pool)
            .await?;
    if role.is_none() {
        return Err(AppError::NotFound("Role not found".to_owned()));
    }

    let id = Uuid::now_v7();
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::Upstream(err.into()))?;

    let result = sqlx::query(
        "INSERT OR IGNORE INTO project_applications
            (id, project_id, role_id, applicant_id, message, status, created_at)
         VALUES (?,?,?,?,?,'pending',?)",
    )
    .bind(id.to_string())
    .bind(project_id.to_string())
    .bind(request.role_id.to_string())
    .bind(request.user_id.to_string())
    .bind(&request.message)
    .bind(&created_at)
    .execute(&db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest("Already applied for this role".to_owned()));
    }

    Ok(Json(ApplicationView {
        id,
        project_id,
        role_id: request.role_id,
        status: "pending".to_owned(),
        created_at,
    }))
}

#[derive(Deserialize)]
struct ApplicationsQuery {
    user_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MyApplication {
    id: Uuid,
    project_id: Uuid,
    project_title: String,
    role_name: String,
    status: String,
    created_at: String,
}

/// `GET /api/projects/applications?user_id=` — the caller's applications
/// with project and role context, newest first.
#[debug_handler(state = AppState)]
async fn my_applications(
    State(db_pool): State<SqlitePool>,
    Query(ApplicationsQuery { user_id }): Query<ApplicationsQuery>,
) -> AppResult<Json<Vec<MyApplication>>> {
    let rows: Vec<(String, String, String, String, String, String)> = sqlx::query_as(
        "SELECT a.id, a.project_id, p.title, r.name, a.status, a.created_at
         FROM project_applications a
         JOIN projects p ON p.id = a.project_id
         JOIN project_roles r ON r.id = a.role_id
         WHERE a.applicant_id = ?
         ORDER BY a.created_at DESC, a.id DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(&db_pool)
    .await?;

    let mut applications = Vec::with_capacity(rows.len());
    for (id, project_id, project_title, role_name, status, created_at) in rows {
        applications.push(MyApplication {
            id: Uuid::parse_str(&id).map_err(|err| AppError::Upstream(err.into()))?,
            project_id: Uuid::parse_str(&project_id)
                .map_err(|err| AppError::Upstream(err.into()))?,
            project_title,
            role_name,
            status,
            created_at,
        });
    }
    Ok(Json(applications))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecideRequest {
    user_id: Uuid,
    status: String,
}

/// `PATCH /api/projects/applications/{application_id}` — the project's
/// initiator accepts or rejects a pending application. Accepting fills one
/// slot of the applied-for role.
#[debug_handler(state = AppState)]
async fn decide_application(
    State(db_pool): State<SqlitePool>,
    Path(application_id): Path<Uuid>,
    Json(request): Json<DecideRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if !APPLICATION_STATUSES.contains(&request.status.as_str()) {
        return Err(AppError::BadRequest(
            "Invalid status. Use \"accepted\" or \"rejected\"".to_owned(),
        ));
    }

    // Only the initiator may decide, and only a pending application; the
    // status gate keeps filled_count from double-counting.
    let result = sqlx::query(
        "UPDATE project_applications SET status = ?
         WHERE id = ? AND status = 'pending'
           AND project_id IN (SELECT id FROM projects WHERE initiator_id = ?)",
    )
    .bind(&request.status)
    .bind(application_id.to_string())
    .bind(request.user_id.to_string())
    .execute(&db_pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Application not found".to_owned()));
    }

    if request.status == "accepted" {
        sqlx::query(
            "UPDATE project_roles SET filled_count = filled_count + 1
             WHERE id = (SELECT role_id FROM project_applications WHERE id = ?)",
        )
        .bind(application_id.to_string())
        .execute(&db_pool)
        .await?;
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}
