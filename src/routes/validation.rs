//! Validation route — dispatches a check type to the validation service.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use super::error::ApiError;
use crate::services::validation::ValidationReport;
use crate::state::AppState;

const VALIDATION_FAILED: &str = "Validation failed";
const INVALID_TYPE: &str = "Invalid validation type. Use: workingHours, callFlow, or onboarding";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub location_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The closed set of check tags accepted over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    WorkingHours,
    CallFlow,
    Onboarding,
}

impl ValidationKind {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "workingHours" => Some(Self::WorkingHours),
            "callFlow" => Some(Self::CallFlow),
            "onboarding" => Some(Self::Onboarding),
            _ => None,
        }
    }
}

/// `POST /api/validation` — run one configuration check for a location.
///
/// The body is parsed explicitly: a body that is not JSON is an
/// outer-boundary failure (500), while a JSON body missing `locationId` or
/// `type`, or carrying an unknown `type`, is rejected with 400 before any
/// service call. A recognized tag triggers exactly one service call and the
/// report is returned verbatim.
pub async fn run(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ValidationReport>, ApiError> {
    let request: ValidationRequest = serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "validation request body is not valid JSON");
        ApiError::internal(e.to_string())
    })?;

    let location_id = request.location_id.filter(|v| !v.is_empty());
    let kind_tag = request.kind.filter(|v| !v.is_empty());
    let (Some(location_id), Some(kind_tag)) = (location_id, kind_tag) else {
        return Err(ApiError::bad_request("locationId and type are required"));
    };

    let Some(kind) = ValidationKind::parse(&kind_tag) else {
        return Err(ApiError::bad_request(INVALID_TYPE));
    };

    let report = match kind {
        ValidationKind::WorkingHours => state.validation.validate_working_hours(&location_id).await,
        ValidationKind::CallFlow => state.validation.validate_call_flow(&location_id).await,
        ValidationKind::Onboarding => {
            state.validation.validate_onboarding_for_submission(&location_id).await
        }
    }
    .map_err(|e| {
        tracing::error!(error = %e, %location_id, "validation check failed");
        ApiError::from_service(&e, VALIDATION_FAILED)
    })?;

    Ok(Json(report))
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
