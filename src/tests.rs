//! Tests for bearer token issuing and validation

use crate::{
    token::{Credential, Extraction, TokenData},
    utils::{current_time, decode_base64, encode_base64, epoch_secs, from_epoch_secs},
    Algorithm, Error, TokenGenerator, TokenOptions,
};
use rand::rngs::mock::StepRng;
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;

fn generator() -> TokenGenerator {
    TokenGenerator::from_parts("secret", Some(60), Some("sha1"))
        .expect("Failed to configure generator")
}

/// Flip the first character of a base64 string to another alphabet character
fn tamper(value: &str) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

/// Random source that always fails
struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {}

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy pool exhausted",
        )))
    }
}

#[test]
fn test_token_creation_and_extraction() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let extraction = generator.extract_token(&credential.access_token);
    assert!(extraction.is_valid);
    assert_eq!(extraction.data, Some(TokenData::Single("user42".to_string())));
    assert_eq!(extraction.expiration_secs(), Some(credential.expiration));
}

#[test]
fn test_basic_pair_extraction() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let extraction = generator.extract_basic(&credential.basic_login, &credential.basic_password);
    assert!(extraction.is_valid);
    assert_eq!(
        extraction.data.as_ref().and_then(|d| d.as_single()),
        Some("user42")
    );
}

#[test]
fn test_known_wire_format() {
    let generator = generator();
    let now = from_epoch_secs(1_700_000_000).unwrap();

    // All-zero salt encodes as "AAAAAAAA"
    let credential = generator
        .create_with_rng("user42", &mut StepRng::new(0, 0), now)
        .expect("Failed to issue token");

    assert_eq!(
        credential,
        Credential {
            expiration: 1_700_000_060,
            access_token:
                "dXNlcjQyOjE3MDAwMDAwNjA6QUFBQUFBQUE6Rmd5S01vWGh6Vit4T0VBQUhHK0NCREM1ZitzPQ=="
                    .to_string(),
            basic_login: "dXNlcjQyOjE3MDAwMDAwNjA6QUFBQUFBQUE=".to_string(),
            basic_password: "FgyKMoXhzV+xOEAAHG+CBDC5f+s=".to_string(),
        }
    );

    let login = decode_base64(&credential.basic_login).unwrap();
    assert_eq!(login, b"user42:1700000060:AAAAAAAA");
}

#[test]
fn test_known_wire_format_sha256_sequence() {
    let generator = TokenGenerator::from_parts("secret", Some(60), Some("sha256")).unwrap();
    let now = from_epoch_secs(1_700_000_000).unwrap();
    let credential = generator
        .create_with_rng(["alice", "admin"], &mut StepRng::new(0, 0), now)
        .unwrap();

    assert_eq!(
        credential.basic_password,
        "E1KGRw7w4kTwBQNOTRPv70clNvoR/PTHdAKJRTc2E+A="
    );
}

#[test]
fn test_expiry_scenario() {
    let generator = generator();
    let now = current_time();
    let credential = generator
        .create_with_rng("user42", &mut OsRng, now)
        .expect("Failed to issue token");

    let extraction = generator.extract_token_at(&credential.access_token, now);
    assert!(extraction.is_valid);
    assert_eq!(extraction.expiration_secs(), Some(epoch_secs(now) + 60));

    // 61 seconds later the token has expired but its fields are still reported
    let later = now + Duration::from_secs(61);
    let extraction = generator.extract_token_at(&credential.access_token, later);
    assert!(!extraction.is_valid);
    assert_eq!(extraction.data, Some(TokenData::Single("user42".to_string())));
    assert_eq!(extraction.expiration_secs(), Some(credential.expiration));
}

#[test]
fn test_tampered_password() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let forged = tamper(&credential.basic_password);
    let extraction = generator.extract_basic(&credential.basic_login, &forged);
    assert!(!extraction.is_valid);
    assert_eq!(
        extraction.data.as_ref().and_then(|d| d.as_single()),
        Some("user42")
    );
}

#[test]
fn test_tampered_access_token_mac() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let payload = String::from_utf8(decode_base64(&credential.access_token).unwrap()).unwrap();
    let (message, mac) = payload.rsplit_once(':').unwrap();
    let forged = encode_base64(format!("{message}:{}", tamper(mac)).as_bytes()).unwrap();

    assert!(!generator.extract_token(&forged).is_valid);
}

#[test]
fn test_tampered_data() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let login = String::from_utf8(decode_base64(&credential.basic_login).unwrap()).unwrap();
    let forged = encode_base64(login.replacen("user42", "admin1", 1).as_bytes()).unwrap();

    assert!(!generator.extract_basic(&forged, &credential.basic_password).is_valid);
}

#[test]
fn test_wrong_key() {
    let issuer = generator();
    let validator = TokenGenerator::from_parts("other-secret", Some(60), Some("sha1")).unwrap();
    let credential = issuer.create("user42").expect("Failed to issue token");

    assert!(!validator.extract_token(&credential.access_token).is_valid);
}

#[test]
fn test_wrong_algorithm() {
    let issuer = generator();
    let validator = TokenGenerator::from_parts("secret", Some(60), Some("sha256")).unwrap();
    let credential = issuer.create("user42").expect("Failed to issue token");

    assert!(!validator.extract_token(&credential.access_token).is_valid);
}

#[test]
fn test_extract_arity() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    let token = credential.access_token.as_str();
    let login = credential.basic_login.as_str();
    let password = credential.basic_password.as_str();

    assert!(generator.extract(&[token]).is_valid);
    assert!(generator.extract(&[login, password]).is_valid);

    // Any other shape is silently invalid with no fields
    assert_eq!(generator.extract(&[]), Extraction::invalid());
    assert_eq!(
        generator.extract(&[login, password, token]),
        Extraction::invalid()
    );
}

#[test]
fn test_multi_field_data() {
    let generator = generator();
    let credential = generator
        .create(vec!["alice", "admin"])
        .expect("Failed to issue token");

    let extraction = generator.extract_token(&credential.access_token);
    assert!(extraction.is_valid);
    assert_eq!(
        extraction.data,
        Some(TokenData::Multiple(vec![
            "alice".to_string(),
            "admin".to_string()
        ]))
    );
}

#[test]
fn test_single_string_with_delimiter_comes_back_split() {
    let generator = generator();
    let credential = generator.create("alice:admin").expect("Failed to issue token");

    let extraction = generator.extract_token(&credential.access_token);
    assert!(extraction.is_valid);
    assert_eq!(
        extraction.data.map(TokenData::into_vec),
        Some(vec!["alice".to_string(), "admin".to_string()])
    );
}

#[test]
fn test_sequence_element_with_delimiter_is_rejected() {
    let generator = generator();
    match generator.create(vec!["alice", "role:admin"]) {
        Err(Error::InvalidSeedData(_)) => {} // Expected
        other => panic!("Expected InvalidSeedData error, got {other:?}"),
    }
}

#[test]
fn test_empty_data() {
    let generator = generator();
    let credential = generator.create("").expect("Failed to issue token");

    let extraction = generator.extract_token(&credential.access_token);
    assert!(extraction.is_valid);
    assert_eq!(extraction.data, Some(TokenData::Single(String::new())));
}

#[test]
fn test_salt_uniqueness() {
    let generator = generator();
    let now = current_time();

    let first = generator.create_with_rng("user42", &mut OsRng, now).unwrap();
    let second = generator.create_with_rng("user42", &mut OsRng, now).unwrap();

    assert_eq!(first.expiration, second.expiration);
    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.basic_password, second.basic_password);

    assert!(generator.extract_token_at(&first.access_token, now).is_valid);
    assert!(generator.extract_token_at(&second.access_token, now).is_valid);
}

#[test]
fn test_entropy_failure_is_propagated() {
    let generator = generator();
    match generator.create_with_rng("user42", &mut FailingRng, current_time()) {
        Err(Error::Entropy(err)) => assert!(err.to_string().contains("entropy pool exhausted")),
        other => panic!("Expected Entropy error, got {other:?}"),
    }
}

#[test]
fn test_algorithm_rejected_at_construction() {
    let result = TokenGenerator::from_options(
        TokenOptions::new("secret").lifetime(60).algorithm("not-a-real-hash"),
    );
    match result {
        Err(Error::UnsupportedAlgorithm(name)) => assert_eq!(name, "not-a-real-hash"),
        other => panic!("Expected UnsupportedAlgorithm error, got {other:?}"),
    }
}

#[test]
fn test_every_algorithm_round_trips() {
    for alg in Algorithm::supported() {
        let generator =
            TokenGenerator::from_parts(b"binary\x00key", None, Some(alg.name())).unwrap();
        assert_eq!(generator.config().algorithm(), *alg);

        let credential = generator.create("user42").unwrap();
        assert!(generator.extract_token(&credential.access_token).is_valid);
        assert_eq!(
            decode_base64(&credential.basic_password).map(|mac| mac.len()),
            Some(alg.tag_len())
        );
    }
}

#[test]
fn test_default_lifetime() {
    let generator = TokenGenerator::from_parts("secret", None, None).unwrap();
    let now = from_epoch_secs(1_700_000_000).unwrap();
    let credential = generator.create_with_rng("user42", &mut OsRng, now).unwrap();
    assert_eq!(credential.expiration, 1_700_003_600);
}

#[test]
fn test_authorization_headers() {
    let generator = generator();
    let credential = generator.create("user42").expect("Failed to issue token");

    assert_eq!(
        credential.authorization_header(),
        format!("Bearer {}", credential.access_token)
    );

    let basic = credential.basic_authorization_header().unwrap();
    let encoded = basic.strip_prefix("Basic ").unwrap();
    let decoded = String::from_utf8(decode_base64(encoded).unwrap()).unwrap();
    assert_eq!(
        decoded,
        format!("{}:{}", credential.basic_login, credential.basic_password)
    );
}

#[test]
fn test_concurrent_use_of_one_generator() {
    let generator = std::sync::Arc::new(generator());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let generator = generator.clone();
            std::thread::spawn(move || {
                let data = format!("user{i}");
                let credential = generator.create(data.as_str()).unwrap();
                let extraction = generator.extract_token(&credential.access_token);
                extraction.is_valid && extraction.data == Some(TokenData::Single(data))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_unpadded_credentials_validate() {
    let generator = generator();
    let now = from_epoch_secs(1_700_000_000).unwrap();
    let credential = generator
        .create_with_rng("user42", &mut StepRng::new(0, 0), now)
        .expect("Failed to issue token");

    // Both encodings of this credential end in padding
    assert!(credential.access_token.ends_with('='));
    assert!(credential.basic_login.ends_with('='));

    let token = credential.access_token.trim_end_matches('=');
    let extraction = generator.extract_token_at(token, now);
    assert!(extraction.is_valid);
    assert_eq!(extraction.data, Some(TokenData::Single("user42".to_string())));

    let login = credential.basic_login.trim_end_matches('=');
    let extraction = generator.extract_basic_at(login, &credential.basic_password, now);
    assert!(extraction.is_valid);
}

#[test]
fn test_credential_expires_at() {
    let generator = generator();
    let now = from_epoch_secs(1_700_000_000).unwrap();
    let credential = generator.create_with_rng("user42", &mut OsRng, now).unwrap();

    assert_eq!(credential.expires_at(), from_epoch_secs(1_700_000_060));
    assert_eq!(
        credential.expires_at(),
        generator.extract_token_at(&credential.access_token, now).expiration
    );
}
