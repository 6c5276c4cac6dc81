use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{interests::{classify, InterestTag}, AppResult};

/// Ensures the user is enrolled in every group matching their classified
/// interests. Already-joined tags are no-ops, so calling this on every
/// login is safe. Membership is never removed when interests change.
pub async fn auto_join(
    db_pool: &SqlitePool,
    user_id: Uuid,
    minat: &str,
) -> AppResult<Vec<InterestTag>> {
    let tags = classify(minat);
    for tag in &tags {
        sqlx::query(
            "INSERT OR IGNORE INTO group_members (group_id, user_id)
             SELECT id, ? FROM interest_groups WHERE interest_category = ?",
        )
        .bind(user_id.to_string())
        .bind(tag.as_str())
        .execute(db_pool)
        .await?;
    }
    Ok(tags)
}
