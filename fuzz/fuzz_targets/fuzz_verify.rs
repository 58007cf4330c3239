#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pqsign::{generate_keypair, verify, KeyPair, PublicKey, Signature};

#[derive(Arbitrary, Debug)]
struct VerifyFuzzInput {
    message: Vec<u8>,
    signature: Vec<u8>,
    public_key: Vec<u8>,
}

fn key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(generate_keypair)
}

fuzz_target!(|input: VerifyFuzzInput| {
    let key_pair = key_pair();

    // Arbitrary signature bytes of any length never verify
    assert!(verify(key_pair.public_key(), &input.message, &input.signature).is_err());

    // A genuine signature verifies for its message only
    let signature = key_pair.sign(&input.message);
    assert!(verify(key_pair.public_key(), &input.message, signature.as_bytes()).is_ok());

    // Arbitrary public keys go through the validated constructor
    if let Ok(public_key) = PublicKey::from_bytes(&input.public_key) {
        let _ = public_key.verify(&input.message, &signature);
    }

    if let Ok(signature) = Signature::from_bytes(&input.signature) {
        let _ = key_pair.verify(&input.message, &signature);
    }
});
