//! Audit log retrieval route.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::services::audit_log::AuditLogEntry;
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch audit logs";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogsResponse {
    pub logs: Vec<AuditLogEntry>,
}

/// Empty-string parameters count as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `GET /api/audit-logs` — list audit entries.
///
/// Scope precedence is fixed: an entity query (both `entityType` and
/// `entityId`) wins over a `userId` query, which wins over the unscoped
/// listing. Exactly one service call runs per request.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<AuditLogsResponse>, ApiError> {
    let entity_type = non_empty(query.entity_type.as_deref());
    let entity_id = non_empty(query.entity_id.as_deref());
    let user_id = non_empty(query.user_id.as_deref());

    let result = match (entity_type, entity_id, user_id) {
        (Some(entity_type), Some(entity_id), _) => {
            state.audit_logs.logs_for_entity(entity_type, entity_id).await
        }
        (_, _, Some(user_id)) => state.audit_logs.logs_for_user(user_id).await,
        _ => state.audit_logs.all_logs().await,
    };

    let logs = result.map_err(|e| {
        tracing::error!(error = %e, "audit log lookup failed");
        ApiError::from_service(&e, FETCH_FAILED)
    })?;

    Ok(Json(AuditLogsResponse { logs }))
}

#[cfg(test)]
#[path = "audit_logs_test.rs"]
mod tests;
