//! Smart-skip service — per-location rules that waive onboarding tasks.
//!
//! A skip rule marks one checklist task as not applicable for a location
//! (e.g. no call flow review for a location without phone service). Rules are
//! authored upstream; this service only reads them. Onboarding validation
//! treats tasks covered by an active rule as satisfied.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::ServiceError;

/// One skip rule, as served over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipRule {
    pub id: String,
    pub location_id: String,
    pub task_key: String,
    pub reason: Option<String>,
    pub active: bool,
    pub created_at: String,
}

#[async_trait::async_trait]
pub trait SmartSkipService: Send + Sync {
    /// All rules for a location, active or not, oldest first.
    async fn rules_for_location(&self, location_id: &str) -> Result<Vec<SkipRule>, ServiceError>;
}

/// Task keys waived by the active rules in `rules`.
#[must_use]
pub fn covered_task_keys(rules: &[SkipRule]) -> HashSet<String> {
    rules
        .iter()
        .filter(|rule| rule.active)
        .map(|rule| rule.task_key.clone())
        .collect()
}

// =============================================================================
// POSTGRES IMPLEMENTATION
// =============================================================================

pub struct PgSmartSkipService {
    pool: PgPool,
}

impl PgSmartSkipService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Shared fetch used here and by onboarding validation.
pub(crate) async fn fetch_rules(pool: &PgPool, location_id: &str) -> Result<Vec<SkipRule>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, String, String, Option<String>, bool, String)>(
        "SELECT id, location_id, task_key, reason, active,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD\"T\"HH24:MI:SS\"Z\"')
         FROM skip_rules
         WHERE location_id = $1
         ORDER BY created_at ASC, id ASC",
    )
    .bind(location_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, location_id, task_key, reason, active, created_at)| SkipRule {
            id,
            location_id,
            task_key,
            reason,
            active,
            created_at,
        })
        .collect())
}

#[async_trait::async_trait]
impl SmartSkipService for PgSmartSkipService {
    async fn rules_for_location(&self, location_id: &str) -> Result<Vec<SkipRule>, ServiceError> {
        Ok(fetch_rules(&self.pool, location_id).await?)
    }
}

#[cfg(test)]
#[path = "smart_skip_test.rs"]
mod tests;
