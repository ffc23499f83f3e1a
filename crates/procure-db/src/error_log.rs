//! Persistent diagnostic log backed by the `error_logs` table.

use chrono::{DateTime, Utc};
use procure_core::ErrorLog;
use sqlx::PgPool;

/// A row from the `error_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ErrorLogRow {
    pub id: i64,
    pub category: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Append one entry to the error log.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_error_log(
    pool: &PgPool,
    category: &str,
    message: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO error_logs (category, message) VALUES ($1, $2) RETURNING id",
    )
    .bind(category)
    .bind(message)
    .fetch_one(pool)
    .await
}

/// Most recent entries first.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_recent_error_logs(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ErrorLogRow>, sqlx::Error> {
    sqlx::query_as::<_, ErrorLogRow>(
        "SELECT id, category, message, created_at \
         FROM error_logs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// [`ErrorLog`] that emits a tracing event and persists the entry on a
/// detached task.
///
/// Persistence failures are only reported through `tracing`. Outside a tokio
/// runtime the entry is traced but not stored.
#[derive(Debug, Clone)]
pub struct PgErrorLog {
    pool: PgPool,
}

impl PgErrorLog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ErrorLog for PgErrorLog {
    fn log_error(&self, message: &str, category: &str) {
        tracing::error!(category, "{message}");

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(category, "no tokio runtime; error log entry not persisted");
            return;
        };

        let pool = self.pool.clone();
        let category = category.to_owned();
        let message = message.to_owned();
        handle.spawn(async move {
            if let Err(e) = insert_error_log(&pool, &category, &message).await {
                tracing::warn!(error = %e, category = %category, "failed to persist error log entry");
            }
        });
    }
}
