use super::*;

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_unique() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn generate_salt_is_32_hex_chars() {
    let salt = generate_salt();
    assert_eq!(salt.len(), 32);
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn bytes_to_hex_zero_pads() {
    assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xff]), "000fff");
}

#[test]
fn hash_password_is_stable_and_salt_sensitive() {
    let a = hash_password("salt1", "hunter2");
    let b = hash_password("salt1", "hunter2");
    let c = hash_password("salt2", "hunter2");
    let d = hash_password("salt1", "hunter3");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
    assert_eq!(a.len(), 64);
}

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  Ops@Example.com "), Some("ops@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("ops"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("ops@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn session_user_serializes_with_camel_case_keys() {
    let user = SessionUser {
        id: Uuid::new_v4(),
        email: "ops@example.com".to_owned(),
        name: "Ops".to_owned(),
    };
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("email").is_some());
    assert!(value.get("name").is_some());
    assert!(value.get("id").is_some());
}
