pub mod ai;
pub mod chat;
pub mod db;
pub mod events;
pub mod groups;
pub mod interests;
pub mod profiles;
pub mod projects;
pub mod tasks;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}, Json, Router};
use serde_json::json;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub ai: ai::AiClients,
    pub tx: broadcast::Sender<groups::msg::GroupMessage>,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/api/chat", chat::router())
        .nest("/api/events", events::router())
        .nest("/api/groups", groups::router())
        .nest("/api/profile", profiles::router())
        .nest("/api/projects", projects::router())
        .nest("/api/tasks", tasks::router())
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub type AppResult<T> = Result<T, AppError>;

/// Request-boundary error. Every handler failure funnels into one of these
/// and reaches the client as `{"error": message}` with the matching status,
/// so no upstream failure can crash the handling task.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request field, rejected before any external call.
    BadRequest(String),
    NotFound(String),
    /// Missing provider credential, detected before the call is attempted.
    Config(String),
    /// Database or AI provider failure, caught at the handler boundary.
    Upstream(anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Config(msg) => msg.clone(),
            AppError::Upstream(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Upstream(err) = &self {
            tracing::error!(error = %err, "request failed");
        }
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Upstream(anyhow::Error::msg(err))
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Upstream(anyhow::Error::msg(err.to_owned()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Upstream(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(serde_json::Error);
apperr_impl!(sqlx::Error);
apperr_impl!(axum::Error);
apperr_impl!(reqwest::Error);
