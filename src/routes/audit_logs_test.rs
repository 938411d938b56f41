use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::*;
use crate::state::AppState;
use crate::state::test_helpers::{MockAuditLogs, MockSkipRules, MockValidation, state_with};
use uuid::Uuid;

fn query(
    entity_type: Option<&str>,
    entity_id: Option<&str>,
    user_id: Option<&str>,
) -> AuditLogQuery {
    AuditLogQuery {
        entity_type: entity_type.map(str::to_owned),
        entity_id: entity_id.map(str::to_owned),
        user_id: user_id.map(str::to_owned),
    }
}

fn state_and_mock(mock: MockAuditLogs) -> (AppState, Arc<MockAuditLogs>) {
    let audit = Arc::new(mock);
    let state = state_with(
        audit.clone(),
        Arc::new(MockSkipRules::default()),
        Arc::new(MockValidation::default()),
    );
    (state, audit)
}

fn dummy_entry() -> crate::services::audit_log::AuditLogEntry {
    crate::services::audit_log::AuditLogEntry {
        id: Uuid::new_v4(),
        entity_type: "location".into(),
        entity_id: "loc_1".into(),
        user_id: Some("u_1".into()),
        action: "location.update".into(),
        details: serde_json::json!({"field": "timezone"}),
        created_at: "2026-08-08T12:00:00Z".into(),
    }
}

#[test]
fn non_empty_filters_empty_strings() {
    assert_eq!(non_empty(Some("loc_1")), Some("loc_1"));
    assert_eq!(non_empty(Some("")), None);
    assert_eq!(non_empty(None), None);
}

#[tokio::test]
async fn entity_scope_wins_even_with_user_id_present() {
    let (state, audit) = state_and_mock(MockAuditLogs::default());

    let result = list(State(state), Query(query(Some("location"), Some("loc_1"), Some("u_1")))).await;

    assert!(result.is_ok());
    assert_eq!(audit.entity_calls.load(Ordering::SeqCst), 1);
    assert_eq!(audit.user_calls.load(Ordering::SeqCst), 0);
    assert_eq!(audit.all_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn user_scope_when_entity_query_is_incomplete() {
    let (state, audit) = state_and_mock(MockAuditLogs::default());

    // entityType alone does not select the entity branch.
    let result = list(State(state), Query(query(Some("location"), None, Some("u_1")))).await;

    assert!(result.is_ok());
    assert_eq!(audit.entity_calls.load(Ordering::SeqCst), 0);
    assert_eq!(audit.user_calls.load(Ordering::SeqCst), 1);
    assert_eq!(audit.all_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_parameters_lists_all_logs() {
    let (state, audit) = state_and_mock(MockAuditLogs::default());

    let result = list(State(state), Query(query(None, None, None))).await;

    assert!(result.is_ok());
    assert_eq!(audit.entity_calls.load(Ordering::SeqCst), 0);
    assert_eq!(audit.user_calls.load(Ordering::SeqCst), 0);
    assert_eq!(audit.all_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_string_parameters_are_treated_as_absent() {
    let (state, audit) = state_and_mock(MockAuditLogs::default());

    let result = list(State(state), Query(query(Some(""), Some(""), Some("")))).await;

    assert!(result.is_ok());
    assert_eq!(audit.all_calls.load(Ordering::SeqCst), 1);
    assert_eq!(audit.entity_calls.load(Ordering::SeqCst), 0);
    assert_eq!(audit.user_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn response_wraps_entries_under_logs_key() {
    let (state, _audit) = state_and_mock(MockAuditLogs { logs: vec![dummy_entry()], ..Default::default() });

    let Json(response) = list(State(state), Query(query(None, None, None))).await.unwrap();
    let value = serde_json::to_value(&response).unwrap();

    let logs = value.get("logs").and_then(serde_json::Value::as_array).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].get("entityType").and_then(serde_json::Value::as_str), Some("location"));
    assert_eq!(logs[0].get("entityId").and_then(serde_json::Value::as_str), Some("loc_1"));
    assert_eq!(logs[0].get("action").and_then(serde_json::Value::as_str), Some("location.update"));
}

#[tokio::test]
async fn service_error_maps_to_500_with_message() {
    let (state, _audit) =
        state_and_mock(MockAuditLogs { fail_with: Some("audit store offline".into()), ..Default::default() });

    let err = list(State(state), Query(query(None, None, None))).await.unwrap_err();

    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message(), "audit store offline");
}
