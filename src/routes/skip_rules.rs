//! Skip-rule retrieval route.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::services::smart_skip::SkipRule;
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch skip rules";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipRuleQuery {
    pub location_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipRulesResponse {
    pub skip_rules: Vec<SkipRule>,
}

/// `GET /api/onboarding/skip-rules` — list a location's skip rules.
///
/// `locationId` is required and must be non-empty; the service is never
/// called otherwise.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SkipRuleQuery>,
) -> Result<Json<SkipRulesResponse>, ApiError> {
    let Some(location_id) = query.location_id.as_deref().filter(|v| !v.is_empty()) else {
        return Err(ApiError::bad_request("locationId is required"));
    };

    let skip_rules = state
        .skip_rules
        .rules_for_location(location_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %location_id, "skip rule lookup failed");
            ApiError::from_service(&e, FETCH_FAILED)
        })?;

    Ok(Json(SkipRulesResponse { skip_rules }))
}

#[cfg(test)]
#[path = "skip_rules_test.rs"]
mod tests;
