/*!
 * Fixed-size key and signature types
 *
 * Each type can only be built from a byte sequence of exactly the length the
 * active variant declares for it, so a public key can never stand in for a
 * signature and a truncated key never reaches the primitive.
 */

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::armor::{self, ArmorKind};
use crate::dilithium::boundary;
use crate::error::{KeyError, KeyKind, VerifyResult};
use crate::params;

/// Bytes shown by `Debug` for public values
const DEBUG_PREFIX: usize = 8;

fn check_length(kind: KeyKind, expected: usize, actual: usize) -> Result<(), KeyError> {
    if actual != expected {
        return Err(KeyError::invalid_length(kind, expected, actual));
    }
    Ok(())
}

fn debug_prefix(bytes: &[u8]) -> String {
    let shown = bytes.len().min(DEBUG_PREFIX);
    format!("{}..", hex::encode(&bytes[..shown]))
}

/// Public key for signature verification
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /// Copy `bytes` into a public key, checking the length
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::try_from(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    /// Verify `signature` over `message` with this key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> VerifyResult {
        boundary::verify(self, message, signature.as_bytes())
    }

    pub fn to_armor(&self) -> String {
        armor::encode(params::active().variant(), ArmorKind::PublicKey, &self.0)
    }

    pub fn from_armor(text: &str) -> Result<Self, KeyError> {
        let bytes = armor::decode(params::active().variant(), ArmorKind::PublicKey, text)?;
        Self::try_from(bytes.to_vec())
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = KeyError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        check_length(
            KeyKind::PublicKey,
            params::active().public_key_size(),
            bytes.len(),
        )?;
        Ok(Self(bytes))
    }
}

impl From<PublicKey> for Vec<u8> {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey")
            .field(&debug_prefix(&self.0))
            .finish()
    }
}

/// Private key for signature generation.
///
/// The bytes are wiped when the key is dropped. Equality is constant time and
/// `Debug` never prints key material. There is no `Serialize` impl; export
/// with [`PrivateKey::to_bytes`] or [`PrivateKey::to_armor`].
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<Vec<u8>>);

impl PrivateKey {
    /// Copy `bytes` into a private key, checking the length
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::try_from(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.0.clone()
    }

    /// Sign `message` with this key
    pub fn sign(&self, message: &[u8]) -> Signature {
        boundary::sign(self, message)
    }

    pub fn to_armor(&self) -> Zeroizing<String> {
        Zeroizing::new(armor::encode(
            params::active().variant(),
            ArmorKind::SecretKey,
            &self.0,
        ))
    }

    pub fn from_armor(text: &str) -> Result<Self, KeyError> {
        let bytes = armor::decode(params::active().variant(), ArmorKind::SecretKey, text)?;
        Self::from_zeroizing(bytes)
    }

    pub(crate) fn from_zeroizing(bytes: Zeroizing<Vec<u8>>) -> Result<Self, KeyError> {
        check_length(
            KeyKind::PrivateKey,
            params::active().private_key_size(),
            bytes.len(),
        )?;
        Ok(Self(bytes))
    }
}

impl TryFrom<Vec<u8>> for PrivateKey {
    type Error = KeyError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_zeroizing(Zeroizing::new(bytes))
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A detached signature over one message
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Copy `bytes` into a signature, checking the length
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Self::try_from(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    pub fn to_armor(&self) -> String {
        armor::encode(params::active().variant(), ArmorKind::Signature, &self.0)
    }

    pub fn from_armor(text: &str) -> Result<Self, KeyError> {
        let bytes = armor::decode(params::active().variant(), ArmorKind::Signature, text)?;
        Self::try_from(bytes.to_vec())
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = KeyError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        check_length(
            KeyKind::Signature,
            params::active().signature_size(),
            bytes.len(),
        )?;
        Ok(Self(bytes))
    }
}

impl From<Signature> for Vec<u8> {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature")
            .field(&debug_prefix(&self.0))
            .finish()
    }
}

/// A matched private/public key pair, as produced by key generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new key pair with the process-wide boundary
    pub fn generate() -> Self {
        boundary::generate_keypair()
    }

    pub(crate) fn from_parts(private_key: PrivateKey, public_key: PublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Split into `(private_key, public_key)`
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.private_key.sign(message)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> VerifyResult {
        self.public_key.verify(message, signature)
    }
}
