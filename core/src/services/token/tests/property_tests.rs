//! Behavioural properties of issued tokens: round trips, expiry, tampering

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::ExtraClaims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with(secret: &str, ttl_seconds: i64) -> TokenService {
    TokenService::new(TokenServiceConfig::new(secret).with_ttl_seconds(ttl_seconds)).unwrap()
}

fn epoch_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_subject_round_trip() {
    let service = service_with("round-trip-secret", 3600);
    let identities = [
        Identity::new("a@x.com", "pw", ["ROLE_USER"]),
        Identity::new("admin@example.com", "pw", ["ROLE_ADMIN", "ROLE_USER"]),
        Identity::new("no-roles@example.com", "pw", Vec::<String>::new()),
        Identity::new("ünïcødé@例え.jp", "pw", ["ROLE_USER"]),
    ];
    let claim_sets = [
        ExtraClaims::new(),
        json!({ "tenant": "acme" }).as_object().cloned().unwrap(),
        json!({ "sub": "someone-else", "n": 42 }).as_object().cloned().unwrap(),
    ];

    for identity in &identities {
        for claims in &claim_sets {
            let token = service.issue_with_claims(identity, claims.clone()).unwrap();
            assert_eq!(service.extract_subject(&token).unwrap(), identity.username);
            assert_eq!(
                service.extract_authorities(&token).unwrap(),
                identity.authority_list()
            );
        }
    }
}

#[test]
fn test_expiry_monotonicity() {
    let ttl = 24 * 3600;
    let service = service_with("expiry-secret", ttl);
    let issued_at = epoch_start();
    let token = service
        .issue_at(&Identity::new("a@x.com", "pw", ["ROLE_USER"]), ExtraClaims::new(), issued_at)
        .unwrap();
    let deadline = issued_at + Duration::seconds(ttl);

    for offset in [0, 1, 3600, ttl - 1, ttl] {
        let at = issued_at + Duration::seconds(offset);
        assert!(!service.is_expired_at(&token, at).unwrap(), "expired at +{}s", offset);
    }
    for offset in [1, 60, 3600, 365 * 24 * 3600] {
        let at = deadline + Duration::seconds(offset);
        assert!(service.is_expired_at(&token, at).unwrap(), "live at deadline+{}s", offset);
    }
}

#[test]
fn test_expiry_is_checked_below_one_second() {
    let ttl = 10;
    let service = service_with("expiry-secret", ttl);
    let identity = Identity::new("a@x.com", "pw", ["ROLE_USER"]);

    for issue_ms in [0, 1, 250, 999] {
        let issued_at = epoch_start() + Duration::milliseconds(issue_ms);
        let token = service
            .issue_at(&identity, ExtraClaims::new(), issued_at)
            .unwrap();
        let deadline = issued_at + Duration::seconds(ttl);
        let exp = service.extract_expiration(&token).unwrap();

        assert!(!service.is_expired_at(&token, deadline).unwrap(), "issued +{}ms", issue_ms);
        assert!(!service.is_expired_at(&token, exp).unwrap(), "issued +{}ms", issue_ms);
        assert!(
            service
                .is_expired_at(&token, exp + Duration::milliseconds(500))
                .unwrap(),
            "issued +{}ms",
            issue_ms
        );
        assert!(
            service
                .is_expired_at(&token, deadline + Duration::seconds(1))
                .unwrap(),
            "issued +{}ms",
            issue_ms
        );
    }
}

#[test]
fn test_tampered_signature_is_malformed() {
    let service = service_with("tamper-secret", 3600);
    let token = service
        .issue(&Identity::new("a@x.com", "pw", ["ROLE_USER"]))
        .unwrap();
    let signature_start = token.rfind('.').unwrap() + 1;
    let signature_len = token.len() - signature_start;

    for position in [0, signature_len / 2, signature_len - 1] {
        let mut bytes = token.clone().into_bytes();
        let index = signature_start + position;
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = service.parse_claims(&tampered);
        assert!(
            matches!(result, Err(DomainError::Token(TokenError::MalformedToken))),
            "tampering at signature byte {} was accepted",
            position
        );
    }
}

#[test]
fn test_tampered_payload_is_malformed() {
    let service = service_with("tamper-secret", 3600);
    let token = service
        .issue(&Identity::new("a@x.com", "pw", ["ROLE_USER"]))
        .unwrap();
    let other = service
        .issue(&Identity::new("admin@x.com", "pw", ["ROLE_ADMIN"]))
        .unwrap();

    // Graft the admin payload onto the user's header and signature.
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert!(matches!(
        service.parse_claims(&forged),
        Err(DomainError::Token(TokenError::MalformedToken))
    ));
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let issuer = service_with("secret-one", 3600);
    let verifier = service_with("secret-two", 3600);
    let token = issuer
        .issue(&Identity::new("a@x.com", "pw", ["ROLE_USER"]))
        .unwrap();

    assert!(issuer.parse_claims(&token).is_ok());
    assert!(matches!(
        verifier.parse_claims(&token),
        Err(DomainError::Token(TokenError::MalformedToken))
    ));
}

#[test]
fn test_validity_composition() {
    let service = service_with("validity-secret", 3600);
    let issued_at = epoch_start();
    let owner = Identity::new("a@x.com", "pw", ["ROLE_USER"]);
    let stranger = Identity::new("b@x.com", "pw", ["ROLE_USER"]);
    let token = service
        .issue_at(&owner, ExtraClaims::new(), issued_at)
        .unwrap();
    let live = issued_at + Duration::minutes(30);
    let expired = issued_at + Duration::hours(2);

    // subject matches, not expired
    assert!(service.is_valid_at(&token, &owner, live).unwrap());
    // subject matches, expired
    assert!(!service.is_valid_at(&token, &owner, expired).unwrap());
    // subject differs, not expired
    assert!(!service.is_valid_at(&token, &stranger, live).unwrap());
    // subject differs, expired
    assert!(!service.is_valid_at(&token, &stranger, expired).unwrap());
}

#[test]
fn test_one_day_token_scenario() {
    let service = service_with("scenario-secret", 24 * 3600);
    let identity = Identity::new("a@x.com", "pw", ["ROLE_USER"]);
    let t0 = epoch_start();
    let token = service
        .issue_at(&identity, ExtraClaims::new(), t0)
        .unwrap();

    let before_expiry = t0 + Duration::hours(23) + Duration::minutes(59);
    let after_expiry = t0 + Duration::hours(24) + Duration::minutes(1);

    assert!(service.is_valid_at(&token, &identity, before_expiry).unwrap());
    assert!(!service.is_valid_at(&token, &identity, after_expiry).unwrap());

    for at in [t0, before_expiry, after_expiry] {
        assert!(service.is_expired_at(&token, at).is_ok());
        assert_eq!(service.extract_subject(&token).unwrap(), "a@x.com");
    }
}
