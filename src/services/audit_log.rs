//! Audit log service — immutable trail of who changed what.
//!
//! DESIGN
//! ======
//! Reads come in three scopes: per-entity, per-user, and unscoped. Entity and
//! user ids are opaque strings because entries reference external platform
//! ids (`loc_123`) as well as internal uuids. Writes go through [`NewAuditLog`]
//! so callers never control `id` or `created_at`.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;

/// Unscoped reads are capped; the trail is append-only and unbounded.
const ALL_LOGS_LIMIT: i64 = 500;

/// One recorded audit event, as served over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: String,
    pub user_id: Option<String>,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: String,
}

/// A new event to record. `id` and `created_at` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub entity_type: String,
    pub entity_id: String,
    pub user_id: Option<String>,
    pub action: String,
    pub details: serde_json::Value,
}

#[async_trait::async_trait]
pub trait AuditLogService: Send + Sync {
    /// Entries for one entity, newest first.
    async fn logs_for_entity(&self, entity_type: &str, entity_id: &str)
    -> Result<Vec<AuditLogEntry>, ServiceError>;

    /// Entries recorded by one user, newest first.
    async fn logs_for_user(&self, user_id: &str) -> Result<Vec<AuditLogEntry>, ServiceError>;

    /// The unscoped trail, newest first, capped at [`ALL_LOGS_LIMIT`].
    async fn all_logs(&self) -> Result<Vec<AuditLogEntry>, ServiceError>;

    /// Append one event.
    async fn record(&self, entry: NewAuditLog) -> Result<(), ServiceError>;
}

// =============================================================================
// POSTGRES IMPLEMENTATION
// =============================================================================

pub struct PgAuditLogService {
    pool: PgPool,
}

impl PgAuditLogService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type AuditLogRow = (Uuid, String, String, Option<String>, String, serde_json::Value, String);

const LOG_COLUMNS: &str = "id, entity_type, entity_id, user_id, action, details, \
     to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD\"T\"HH24:MI:SS\"Z\"')";

fn to_entry(row: AuditLogRow) -> AuditLogEntry {
    let (id, entity_type, entity_id, user_id, action, details, created_at) = row;
    AuditLogEntry { id, entity_type, entity_id, user_id, action, details, created_at }
}

#[async_trait::async_trait]
impl AuditLogService for PgAuditLogService {
    async fn logs_for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditLogEntry>, ServiceError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM audit_logs
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC"
        ))
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_entry).collect())
    }

    async fn logs_for_user(&self, user_id: &str) -> Result<Vec<AuditLogEntry>, ServiceError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM audit_logs
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_entry).collect())
    }

    async fn all_logs(&self) -> Result<Vec<AuditLogEntry>, ServiceError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM audit_logs
             ORDER BY created_at DESC
             LIMIT $1"
        ))
        .bind(ALL_LOGS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(to_entry).collect())
    }

    async fn record(&self, entry: NewAuditLog) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO audit_logs (entity_type, entity_id, user_id, action, details)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.user_id)
        .bind(&entry.action)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "audit_log_test.rs"]
mod tests;
