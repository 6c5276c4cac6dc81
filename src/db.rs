use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{interests::ALL_TAGS, AppResult};

/// Creates the schema if it does not exist and seeds the eight interest
/// groups. Safe to run on every startup.
pub async fn init(db_pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(db_pool).await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            username TEXT,
            avatar_url TEXT,
            email TEXT
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_data (
            user_id TEXT PRIMARY KEY,
            minat TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS interest_groups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            interest_category TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS group_members (
            group_id TEXT NOT NULL REFERENCES interest_groups(id),
            user_id TEXT NOT NULL,
            UNIQUE (group_id, user_id)
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS group_messages (
            id TEXT PRIMARY KEY,
            group_id TEXT NOT NULL REFERENCES interest_groups(id),
            user_id TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            priority TEXT NOT NULL DEFAULT 'medium',
            deadline TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            initiator_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'open',
            deadline TEXT,
            progress INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS project_roles (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            name TEXT NOT NULL,
            required_count INTEGER NOT NULL,
            filled_count INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(db_pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS project_applications (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            role_id TEXT NOT NULL REFERENCES project_roles(id),
            applicant_id TEXT NOT NULL,
            message TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL,
            UNIQUE (role_id, applicant_id)
        )",
    )
    .execute(db_pool)
    .await?;

    seed_groups(db_pool).await
}

/// One chat room per interest tag. Group ids are stable across restarts
/// because the category column is unique and existing rows are kept.
async fn seed_groups(db_pool: &SqlitePool) -> AppResult<()> {
    for tag in ALL_TAGS {
        sqlx::query(
            "INSERT OR IGNORE INTO interest_groups (id, name, interest_category, description)
             VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(tag.label())
        .bind(tag.as_str())
        .bind(format!("Grup diskusi untuk minat {}", tag.label()))
        .execute(db_pool)
        .await?;
    }
    Ok(())
}
