use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

pub const LIST_GENERATED: &str = "list_generated";
pub const PURCHASE_COMPLETED: &str = "purchase_completed";
pub const LIST_ARCHIVED: &str = "list_archived";
pub const LIST_RESTORED: &str = "list_restored";

pub async fn log_history(
    pool: &DbPool,
    user_id: Uuid,
    action: &str,
    list_id: Option<Uuid>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO history_events (id, user_id, action, list_id, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(action)
    .bind(list_id)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// History is best effort: a failed insert is logged, never surfaced.
pub async fn record(
    pool: &DbPool,
    user_id: Uuid,
    action: &str,
    list_id: Option<Uuid>,
    metadata: Value,
) {
    if let Err(err) = log_history(pool, user_id, action, list_id, Some(metadata)).await {
        tracing::warn!(error = %err, action, "history log failed");
    }
}
