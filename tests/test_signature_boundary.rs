//! Integration tests for the signature boundary

use pqsign::prelude::*;
use sha2::{Digest, Sha256};

fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// Sign a digest, then tamper with the signature and with the digest
#[test]
fn test_digest_tamper_scenario() {
    let key_pair = generate_keypair();
    let digest = sha256(&0u64.to_be_bytes());
    assert_eq!(digest.len(), 32);

    let signature = key_pair.sign(&digest);
    assert!(verify(key_pair.public_key(), &digest, signature.as_bytes()).is_ok());

    let mut tampered = signature.to_bytes();
    tampered[0] = tampered[0].wrapping_add(1);
    assert_eq!(
        verify(key_pair.public_key(), &digest, &tampered),
        Err(VerificationError::BadSignature)
    );

    let mut other_digest = digest.clone();
    other_digest[0] = other_digest[0].wrapping_add(1);
    assert_eq!(
        verify(key_pair.public_key(), &other_digest, signature.as_bytes()),
        Err(VerificationError::BadSignature)
    );
}

/// Sign the empty message, then alter the signature length
#[test]
fn test_empty_message_scenario() {
    let key_pair = generate_keypair();
    let signature = key_pair.sign(&[]);
    assert!(verify(key_pair.public_key(), &[], signature.as_bytes()).is_ok());

    let mut extended = signature.to_bytes();
    extended.push(0);
    assert_eq!(
        verify(key_pair.public_key(), &[], &extended),
        Err(VerificationError::BadSignature)
    );

    let bytes = signature.as_bytes();
    assert_eq!(
        verify(key_pair.public_key(), &[], &bytes[..bytes.len() - 2]),
        Err(VerificationError::BadSignature)
    );

    assert_eq!(
        verify(key_pair.public_key(), &[], &[]),
        Err(VerificationError::BadSignature)
    );
}

/// Every length failure looks the same as a forged signature
#[test]
fn test_failures_are_indistinguishable() {
    let key_pair = generate_keypair();
    let signature = key_pair.sign(b"oracle");
    let bytes = signature.as_bytes();

    let mut forged = bytes.to_vec();
    forged[bytes.len() / 2] ^= 0x01;

    let errors = [
        verify(key_pair.public_key(), b"oracle", &[]).unwrap_err(),
        verify(key_pair.public_key(), b"oracle", &bytes[..bytes.len() - 1]).unwrap_err(),
        verify(key_pair.public_key(), b"oracle", &forged).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err, VerificationError::BadSignature);
        assert_eq!(err.to_string(), "bad signature");
    }
}

#[test]
fn test_length_sensitivity() {
    let key_pair = generate_keypair();
    let message = b"length sensitivity";
    let signature = key_pair.sign(message);
    let bytes = signature.as_bytes();

    let mut longer = bytes.to_vec();
    longer.push(0xff);

    for candidate in [&longer[..], &bytes[..bytes.len() - 1], &bytes[..bytes.len() - 2]] {
        assert!(verify(key_pair.public_key(), message, candidate).is_err());
    }
}

#[test]
fn test_empty_signature_always_rejected() {
    let key_pair = generate_keypair();
    for message in [&b""[..], &b"x"[..], &[0u8; 4096][..]] {
        assert_eq!(
            verify(key_pair.public_key(), message, &[]),
            Err(VerificationError::BadSignature)
        );
    }
}

#[test]
fn test_verification_is_deterministic() {
    let key_pair = generate_keypair();
    let signature = key_pair.sign(b"repeat");
    let mut forged = signature.to_bytes();
    forged[10] ^= 0x80;

    for _ in 0..5 {
        assert!(verify(key_pair.public_key(), b"repeat", signature.as_bytes()).is_ok());
        assert!(verify(key_pair.public_key(), b"repeat", &forged).is_err());
    }
}

/// Several iterations over short and empty messages
#[test]
fn test_varying_message_sizes() {
    const ITERATIONS: usize = 3;
    let message_sizes = [0usize, 1, 13, 32, 64, 100];

    for iteration in 0..ITERATIONS {
        for &size in &message_sizes {
            let message: Vec<u8> = (0..size).map(|i| (i + iteration) as u8).collect();
            let key_pair = generate_keypair();
            let signature = key_pair.sign(&message);

            assert_eq!(signature.as_bytes().len(), pqsign::signature_size());
            assert!(
                key_pair.verify(&message, &signature).is_ok(),
                "message of {} bytes failed to verify",
                size
            );
        }
    }
}

#[test]
fn test_signing_twice_gives_two_valid_signatures() {
    let key_pair = generate_keypair();
    let first = key_pair.sign(b"twice");
    let second = key_pair.sign(b"twice");
    assert!(key_pair.verify(b"twice", &first).is_ok());
    assert!(key_pair.verify(b"twice", &second).is_ok());
}

#[test]
fn test_init_is_idempotent() {
    init_with(SchemeConfig::default()).unwrap();
    init_with(SchemeConfig::default()).unwrap();

    let err = init_with(SchemeConfig::new(DilithiumVariant::Dilithium5)).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInitialized { .. }));
    assert_eq!(pqsign::public_key_size(), DilithiumVariant::Dilithium3.public_key_size());
    assert_eq!(pqsign::private_key_size(), DilithiumVariant::Dilithium3.private_key_size());
}

#[test]
fn test_concurrent_sign_and_verify() {
    let key_pair = generate_keypair();

    std::thread::scope(|scope| {
        for worker in 0..4u8 {
            let key_pair = &key_pair;
            scope.spawn(move || {
                for round in 0..5u8 {
                    let message = [worker, round];
                    let signature = key_pair.sign(&message);
                    assert!(key_pair.verify(&message, &signature).is_ok());
                    assert!(key_pair.verify(&[round, worker, 0], &signature).is_err());
                }
            });
        }
    });
}

#[test]
fn test_keys_and_signature_are_distinct_types() {
    let key_pair = generate_keypair();
    let signature = key_pair.sign(b"typed");

    assert!(Signature::from_bytes(key_pair.public_key().as_bytes()).is_err());
    assert!(PublicKey::from_bytes(signature.as_bytes()).is_err());
    assert!(PrivateKey::from_bytes(key_pair.public_key().as_bytes()).is_err());
}
