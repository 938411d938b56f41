//! Validation service — readiness checks on a location's configuration.
//!
//! DESIGN
//! ======
//! Each check fetches the location's configured rows and reduces them through
//! a pure issue-computing helper, so the rules themselves are testable without
//! a database. A check never fails the request when the configuration is
//! merely wrong; it reports issues. Only an unknown location or a storage
//! failure is an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::ServiceError;
use super::smart_skip;

/// One problem found by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable machine-readable tag, e.g. `working_hours_inverted`.
    pub code: String,
    /// The configuration area the issue belongs to.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(code: &str, field: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_owned(), field: field.to_owned(), message: message.into() }
    }
}

/// Result of one validation run, returned verbatim to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub location_id: String,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new(location_id: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self { location_id: location_id.into(), valid: issues.is_empty(), issues }
    }
}

#[async_trait::async_trait]
pub trait ValidationService: Send + Sync {
    /// Check the location's weekly opening hours.
    async fn validate_working_hours(&self, location_id: &str) -> Result<ValidationReport, ServiceError>;

    /// Check the location's call routing steps.
    async fn validate_call_flow(&self, location_id: &str) -> Result<ValidationReport, ServiceError>;

    /// Check whether the onboarding checklist is ready to submit, honoring
    /// active skip rules.
    async fn validate_onboarding_for_submission(
        &self,
        location_id: &str,
    ) -> Result<ValidationReport, ServiceError>;
}

// =============================================================================
// ROW SHAPES
// =============================================================================

#[derive(Debug, Clone)]
pub(crate) struct WorkingHoursRow {
    pub day_of_week: i16,
    /// `HH24:MI`, pre-rendered by the query.
    pub opens_at: String,
    pub closes_at: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CallFlowRow {
    pub name: String,
    pub destination: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct OnboardingTaskRow {
    pub task_key: String,
    pub label: String,
    pub required: bool,
    pub completed: bool,
}

// =============================================================================
// ISSUE RULES
// =============================================================================

const DAY_NAMES: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

fn day_name(day: i16) -> Option<&'static str> {
    usize::try_from(day).ok().and_then(|i| DAY_NAMES.get(i)).copied()
}

pub(crate) fn working_hours_issues(rows: &[WorkingHoursRow]) -> Vec<ValidationIssue> {
    if rows.is_empty() {
        return vec![ValidationIssue::new(
            "working_hours_missing",
            "workingHours",
            "No working hours are configured for this location",
        )];
    }

    let mut issues = Vec::new();
    let mut seen_days = HashSet::new();
    for row in rows {
        let Some(name) = day_name(row.day_of_week) else {
            issues.push(ValidationIssue::new(
                "working_hours_invalid_day",
                "workingHours",
                format!("Unknown day of week: {}", row.day_of_week),
            ));
            continue;
        };
        if !seen_days.insert(row.day_of_week) {
            issues.push(ValidationIssue::new(
                "working_hours_duplicate_day",
                "workingHours",
                format!("{name} is configured more than once"),
            ));
        }
        // HH24:MI strings compare correctly as text.
        if row.opens_at >= row.closes_at {
            issues.push(ValidationIssue::new(
                "working_hours_inverted",
                "workingHours",
                format!(
                    "{name}: opening time {} is not before closing time {}",
                    row.opens_at, row.closes_at
                ),
            ));
        }
    }
    issues
}

pub(crate) fn call_flow_issues(rows: &[CallFlowRow]) -> Vec<ValidationIssue> {
    if !rows.iter().any(|row| row.enabled) {
        return vec![ValidationIssue::new(
            "call_flow_missing",
            "callFlow",
            "No enabled call flow steps are configured",
        )];
    }

    rows.iter()
        .filter(|row| row.enabled && row.destination.trim().is_empty())
        .map(|row| {
            ValidationIssue::new(
                "call_flow_no_destination",
                "callFlow",
                format!("Step \"{}\" has no destination", row.name),
            )
        })
        .collect()
}

pub(crate) fn onboarding_issues(
    tasks: &[OnboardingTaskRow],
    skipped: &HashSet<String>,
) -> Vec<ValidationIssue> {
    if tasks.is_empty() {
        return vec![ValidationIssue::new(
            "tasks_missing",
            "tasks",
            "No onboarding tasks are configured for this location",
        )];
    }

    tasks
        .iter()
        .filter(|task| task.required && !task.completed && !skipped.contains(&task.task_key))
        .map(|task| {
            ValidationIssue::new(
                "task_incomplete",
                &task.task_key,
                format!("Required task \"{}\" is not complete", task.label),
            )
        })
        .collect()
}

// =============================================================================
// POSTGRES IMPLEMENTATION
// =============================================================================

pub struct PgValidationService {
    pool: PgPool,
}

impl PgValidationService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_location(&self, location_id: &str) -> Result<(), ServiceError> {
        let found = sqlx::query_scalar::<_, String>("SELECT id FROM locations WHERE id = $1")
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await?;
        if found.is_none() {
            return Err(ServiceError::LocationNotFound(location_id.to_owned()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ValidationService for PgValidationService {
    async fn validate_working_hours(&self, location_id: &str) -> Result<ValidationReport, ServiceError> {
        self.ensure_location(location_id).await?;

        let rows = sqlx::query_as::<_, (i16, String, String)>(
            "SELECT day_of_week, to_char(opens_at, 'HH24:MI'), to_char(closes_at, 'HH24:MI')
             FROM location_working_hours
             WHERE location_id = $1
             ORDER BY day_of_week ASC, opens_at ASC",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(day_of_week, opens_at, closes_at)| WorkingHoursRow { day_of_week, opens_at, closes_at })
        .collect::<Vec<_>>();

        Ok(ValidationReport::new(location_id, working_hours_issues(&rows)))
    }

    async fn validate_call_flow(&self, location_id: &str) -> Result<ValidationReport, ServiceError> {
        self.ensure_location(location_id).await?;

        let rows = sqlx::query_as::<_, (String, String, bool)>(
            "SELECT name, destination, enabled
             FROM call_flows
             WHERE location_id = $1
             ORDER BY position ASC, name ASC",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(name, destination, enabled)| CallFlowRow { name, destination, enabled })
        .collect::<Vec<_>>();

        Ok(ValidationReport::new(location_id, call_flow_issues(&rows)))
    }

    async fn validate_onboarding_for_submission(
        &self,
        location_id: &str,
    ) -> Result<ValidationReport, ServiceError> {
        self.ensure_location(location_id).await?;

        let tasks = sqlx::query_as::<_, (String, String, bool, bool)>(
            "SELECT task_key, label, required, completed_at IS NOT NULL
             FROM onboarding_tasks
             WHERE location_id = $1
             ORDER BY task_key ASC",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(task_key, label, required, completed)| OnboardingTaskRow {
            task_key,
            label,
            required,
            completed,
        })
        .collect::<Vec<_>>();

        let rules = smart_skip::fetch_rules(&self.pool, location_id).await?;
        let skipped = smart_skip::covered_task_keys(&rules);

        Ok(ValidationReport::new(location_id, onboarding_issues(&tasks, &skipped)))
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
