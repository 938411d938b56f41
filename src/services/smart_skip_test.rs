use super::*;

fn rule(id: &str, task_key: &str, active: bool) -> SkipRule {
    SkipRule {
        id: id.to_owned(),
        location_id: "loc_1".to_owned(),
        task_key: task_key.to_owned(),
        reason: None,
        active,
        created_at: "2026-08-08T12:00:00Z".to_owned(),
    }
}

#[test]
fn covered_task_keys_ignores_inactive_rules() {
    let rules = vec![
        rule("r1", "call_flow_review", true),
        rule("r2", "working_hours_review", false),
    ];
    let covered = covered_task_keys(&rules);
    assert!(covered.contains("call_flow_review"));
    assert!(!covered.contains("working_hours_review"));
}

#[test]
fn covered_task_keys_dedupes() {
    let rules = vec![
        rule("r1", "call_flow_review", true),
        rule("r2", "call_flow_review", true),
    ];
    assert_eq!(covered_task_keys(&rules).len(), 1);
}

#[test]
fn covered_task_keys_empty_for_no_rules() {
    assert!(covered_task_keys(&[]).is_empty());
}

#[test]
fn rule_serializes_with_camel_case_keys() {
    let value = serde_json::to_value(rule("r1", "call_flow_review", true)).unwrap();
    assert_eq!(value.get("id").and_then(serde_json::Value::as_str), Some("r1"));
    assert!(value.get("locationId").is_some());
    assert!(value.get("taskKey").is_some());
    assert!(value.get("createdAt").is_some());
    assert!(value.get("location_id").is_none());
}
