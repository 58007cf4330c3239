/*!
 * pqsign: a typed post-quantum signature boundary
 *
 * Key generation, signing and verification over CRYSTALS-Dilithium with
 * fixed-size keys and signatures. The lattice scheme itself is provided by
 * liboqs; this crate owns the byte-length contract around it and the
 * verification failure model.
 *
 * ```
 * use pqsign::prelude::*;
 *
 * pqsign::init().unwrap();
 *
 * let key_pair = KeyPair::generate();
 * let signature = key_pair.sign(b"Hello, world!");
 *
 * assert!(key_pair.public_key().verify(b"Hello, world!", &signature).is_ok());
 * assert_eq!(
 *     pqsign::verify(key_pair.public_key(), b"Hello, world!", &[]),
 *     Err(VerificationError::BadSignature)
 * );
 * ```
 */

/// Text armor for keys and signatures
pub mod armor;

/// CRYSTALS-Dilithium signature boundary
pub mod dilithium;

/// Error types and the fatal-error path
pub mod error;

/// Variant selection and the process-wide scheme parameters
pub mod params;

/// The external signature primitive
pub mod primitive;

pub use dilithium::{
    generate_keypair, sign, verify, KeyPair, PrivateKey, PublicKey, Signature, SignatureBoundary,
};
pub use error::{ConfigError, KeyError, VerificationError, VerifyResult};
pub use params::{DilithiumVariant, SchemeConfig, SchemeParams};

/// Initialize the signature boundary from the environment.
///
/// Reads the variant from `PQSIGN_VARIANT` (default Dilithium3), resolves the
/// process-wide parameters and runs the startup self-check against liboqs.
/// A size mismatch between the declared variant and the linked library
/// aborts the process.
///
/// Calling `init` is optional; the first key or signature operation resolves
/// the default variant on its own.
pub fn init() -> Result<(), ConfigError> {
    init_with(SchemeConfig::from_env()?)
}

/// Initialize the signature boundary with an explicit configuration.
///
/// Fails with [`ConfigError::AlreadyInitialized`] when a different variant is
/// already active.
pub fn init_with(config: SchemeConfig) -> Result<(), ConfigError> {
    params::install(config)?;
    dilithium::default_boundary();
    Ok(())
}

/// `PUBLIC_KEY_SIZE` of the active variant
pub fn public_key_size() -> usize {
    params::active().public_key_size()
}

/// `PRIVATE_KEY_SIZE` of the active variant
pub fn private_key_size() -> usize {
    params::active().private_key_size()
}

/// `SIGNATURE_SIZE` of the active variant
pub fn signature_size() -> usize {
    params::active().signature_size()
}

/// The commonly used types and functions in one import
pub mod prelude {
    pub use crate::armor::ArmorKind;
    pub use crate::generate_keypair;
    pub use crate::init;
    pub use crate::init_with;
    pub use crate::sign;
    pub use crate::verify;
    pub use crate::ConfigError;
    pub use crate::DilithiumVariant;
    pub use crate::KeyError;
    pub use crate::KeyPair;
    pub use crate::PrivateKey;
    pub use crate::PublicKey;
    pub use crate::SchemeConfig;
    pub use crate::Signature;
    pub use crate::SignatureBoundary;
    pub use crate::VerificationError;
    pub use crate::VerifyResult;
}
