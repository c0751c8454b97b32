//! Credential format acceptance through the public client surface.

use aplus::config::GenerationConfig;
use aplus::error::ApiError;
use aplus::provider::{Credential, GenerationClient, OllamaClient};

#[test]
fn test_accepted_and_rejected_formats() {
    for raw in ["sk-abc123", "sk-proj-ABC_123-xyz"] {
        assert!(Credential::parse(raw).is_ok(), "{} should be accepted", raw);
    }
    for raw in ["abc-123", "sk abc", "", "sk-", "SK-abc", "sk-abc!"] {
        assert!(
            matches!(Credential::parse(raw), Err(ApiError::InvalidCredentialFormat)),
            "{:?} should be rejected",
            raw
        );
    }
}

#[test]
fn test_rejected_key_keeps_previous_one() {
    let client = OllamaClient::new(&GenerationConfig::default()).unwrap();
    client.set_credential("sk-first").unwrap();
    assert!(client.set_credential("not a key").is_err());
    assert!(client.has_credential());
}

#[test]
fn test_slots_are_per_client() {
    let first = OllamaClient::new(&GenerationConfig::default()).unwrap();
    let second = OllamaClient::new(&GenerationConfig::default()).unwrap();
    first.set_credential("sk-only-first").unwrap();
    assert!(first.has_credential());
    assert!(!second.has_credential());
}

#[test]
fn test_debug_output_hides_key() {
    let credential = Credential::parse("sk-very-secret").unwrap();
    assert!(!format!("{:?}", credential).contains("very-secret"));
}
