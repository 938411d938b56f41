use super::*;

fn dummy_row() -> AuditLogRow {
    (
        Uuid::new_v4(),
        "location".to_owned(),
        "loc_1".to_owned(),
        Some("u_1".to_owned()),
        "location.update".to_owned(),
        serde_json::json!({"field": "timezone"}),
        "2026-08-08T12:00:00Z".to_owned(),
    )
}

#[test]
fn to_entry_maps_all_columns() {
    let row = dummy_row();
    let id = row.0;
    let entry = to_entry(row);
    assert_eq!(entry.id, id);
    assert_eq!(entry.entity_type, "location");
    assert_eq!(entry.entity_id, "loc_1");
    assert_eq!(entry.user_id.as_deref(), Some("u_1"));
    assert_eq!(entry.action, "location.update");
    assert_eq!(entry.created_at, "2026-08-08T12:00:00Z");
}

#[test]
fn entry_serializes_with_camel_case_keys() {
    let entry = to_entry(dummy_row());
    let value = serde_json::to_value(&entry).unwrap();
    assert!(value.get("entityType").is_some());
    assert!(value.get("entityId").is_some());
    assert!(value.get("userId").is_some());
    assert!(value.get("createdAt").is_some());
    assert!(value.get("entity_type").is_none());
}

#[test]
fn entry_round_trips_through_json() {
    let entry = to_entry(dummy_row());
    let json = serde_json::to_string(&entry).unwrap();
    let restored: AuditLogEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, entry.id);
    assert_eq!(restored.details, entry.details);
}

#[test]
fn log_columns_render_created_at_as_utc_string() {
    assert!(LOG_COLUMNS.contains("to_char"));
    assert!(LOG_COLUMNS.contains("AT TIME ZONE 'UTC'"));
}
