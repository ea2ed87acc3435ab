//! Unit tests for session claims and token validation.

use chrono::{Duration, Utc};
use rstest::rstest;
use uuid::Uuid;

use crate::auth::{Claims, LoginRequest};
use crate::jwt::{JwtConfig, JwtError, JwtService};

fn service_with_secret(secret: &str) -> JwtService {
    JwtService::new(JwtConfig {
        secret: secret.to_string(),
        token_ttl_hours: 24,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);
    let before = Utc::now().timestamp();

    let claims = Claims::new(user_id, "admin", expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "admin");
    assert!(claims.iat >= before);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[rstest]
#[case("admin")]
#[case("employee")]
fn test_token_round_trips_role(#[case] role: &str) {
    let service = service_with_secret("round-trip");
    let user_id = Uuid::new_v4();

    let token = service.generate_token(user_id, role).unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.role, role);
}

#[test]
fn test_token_expiry_is_twenty_four_hours_out() {
    let service = service_with_secret("expiry");
    let token = service.generate_token(Uuid::new_v4(), "admin").unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[test]
fn test_expired_token_is_rejected() {
    let service = service_with_secret("expired");
    let claims = Claims::new(Uuid::new_v4(), "admin", Utc::now() - Duration::hours(2));
    let token = service.encode_claims(&claims).unwrap();

    assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let issuer = service_with_secret("issuer-secret");
    let verifier = service_with_secret("verifier-secret");
    let token = issuer.generate_token(Uuid::new_v4(), "admin").unwrap();

    assert!(matches!(
        verifier.validate_token(&token),
        Err(JwtError::DecodingError(_))
    ));
}

#[test]
fn test_claims_serialize_with_expected_keys() {
    let claims = Claims::new(Uuid::new_v4(), "employee", Utc::now() + Duration::hours(1));
    let json = serde_json::to_value(&claims).unwrap();

    assert!(json.get("sub").is_some());
    assert_eq!(json["role"], "employee");
    assert!(json.get("iat").is_some());
    assert!(json.get("exp").is_some());
}

#[test]
fn test_login_request_defaults_missing_fields() {
    let request: LoginRequest = serde_json::from_str(r#"{"username": "admin"}"#).unwrap();
    assert_eq!(request.username, "admin");
    assert!(request.password.is_empty());
}

#[test]
fn test_debug_hides_keys() {
    let service = service_with_secret("super-secret");
    let debug = format!("{service:?}");
    assert!(debug.contains("[hidden]"));
    assert!(!debug.contains("super-secret"));
}
