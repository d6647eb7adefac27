//! Unit tests for the identity entity

use crate::domain::entities::identity::Identity;

#[test]
fn test_identity_creation() {
    let identity = Identity::new("a@x.com", "hash", ["ROLE_USER", "ROLE_ADMIN"]);

    assert_eq!(identity.username, "a@x.com");
    assert_eq!(identity.password_hash, "hash");
    assert!(identity.authorities.contains("ROLE_USER"));
    assert!(identity.authorities.contains("ROLE_ADMIN"));
    assert!(!identity.authorities.contains("ROLE_ROOT"));
}

#[test]
fn test_authorities_are_deduplicated_and_sorted() {
    let identity = Identity::new(
        "a@x.com",
        "hash",
        ["ROLE_USER", "ROLE_AUDITOR", "ROLE_ADMIN", "ROLE_USER"],
    );

    assert_eq!(
        identity.authority_list(),
        vec!["ROLE_ADMIN", "ROLE_AUDITOR", "ROLE_USER"]
    );
}

#[test]
fn test_password_hash_is_not_serialized() {
    let identity = Identity::new("a@x.com", "secret-hash", ["ROLE_USER"]);
    let json = serde_json::to_value(&identity).unwrap();

    assert_eq!(json["username"], "a@x.com");
    assert!(json.get("password_hash").is_none());
}
