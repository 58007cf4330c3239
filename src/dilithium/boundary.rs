/*!
 * The signature boundary
 *
 * Mediates between caller-supplied byte buffers and the signature primitive.
 * Sizes are checked on the way in and on the way out; the primitive only ever
 * sees buffers of the lengths it declares.
 */

use std::sync::OnceLock;

use crate::dilithium::keys::{KeyPair, PrivateKey, PublicKey, Signature};
use crate::error::{fatal, FatalError, KeyKind, VerificationError, VerifyResult};
use crate::params::{self, SchemeParams};
use crate::primitive::{OqsPrimitive, SignaturePrimitive};

/// Key generation, signing and verification over one primitive.
///
/// Construction runs the startup self-check: the sizes the primitive reports
/// must equal the sizes declared for the active variant, otherwise the
/// process cannot sign safely and construction aborts.
pub struct SignatureBoundary<P = OqsPrimitive> {
    params: &'static SchemeParams,
    primitive: P,
}

impl SignatureBoundary<OqsPrimitive> {
    /// A boundary over liboqs for the active variant
    pub fn oqs() -> Self {
        Self::new(OqsPrimitive::new(params::active().variant()))
    }
}

impl<P: SignaturePrimitive> SignatureBoundary<P> {
    /// Wrap `primitive` after checking its sizes against the active variant
    pub fn new(primitive: P) -> Self {
        let params = params::active();
        let declared = params.sizes();

        let linked = primitive.sizes().unwrap_or_else(|e| {
            fatal(FatalError::PrimitiveUnavailable {
                variant: params.variant().to_string(),
                cause: e.to_string(),
            })
        });
        if linked != declared {
            fatal(FatalError::SizeMismatch {
                variant: params.variant().to_string(),
                declared: declared.to_string(),
                linked: linked.to_string(),
            });
        }

        log::info!(
            "signature boundary ready: {} ({})",
            params.variant(),
            declared
        );
        Self { params, primitive }
    }

    pub fn params(&self) -> &'static SchemeParams {
        self.params
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Generate a fresh matched key pair.
    ///
    /// Entropy or generation failure in the primitive aborts; there is no
    /// partial or degraded result.
    pub fn generate_keypair(&self) -> KeyPair {
        let (public, private) = self
            .primitive
            .keypair()
            .unwrap_or_else(|e| fatal(FatalError::KeyGeneration(e.to_string())));

        let public_len = public.len();
        let public_key = PublicKey::try_from(public).unwrap_or_else(|_| {
            fatal(FatalError::InternalInvariantViolation {
                kind: KeyKind::PublicKey,
                expected: self.params.public_key_size(),
                actual: public_len,
            })
        });
        let private_len = private.len();
        let private_key = PrivateKey::from_zeroizing(private).unwrap_or_else(|_| {
            fatal(FatalError::InternalInvariantViolation {
                kind: KeyKind::PrivateKey,
                expected: self.params.private_key_size(),
                actual: private_len,
            })
        });

        log::debug!("generated {} key pair", self.params.variant());
        KeyPair::from_parts(private_key, public_key)
    }

    /// Sign `message`, which may be empty.
    ///
    /// The produced signature is always exactly `SIGNATURE_SIZE` bytes. Any
    /// other length from the primitive aborts rather than being truncated or
    /// padded.
    pub fn sign(&self, private_key: &PrivateKey, message: &[u8]) -> Signature {
        let produced = self
            .primitive
            .sign(message, private_key.as_bytes())
            .unwrap_or_else(|e| fatal(FatalError::Signing(e.to_string())));

        let actual = produced.len();
        let signature = Signature::try_from(produced).unwrap_or_else(|_| {
            fatal(FatalError::InternalInvariantViolation {
                kind: KeyKind::Signature,
                expected: self.params.signature_size(),
                actual,
            })
        });

        log::debug!("signed {} byte message", message.len());
        signature
    }

    /// Verify an untrusted `signature` of any length over `message`.
    ///
    /// The primitive is only consulted when the signature has exactly
    /// `SIGNATURE_SIZE` bytes. Every failure is `BadSignature`.
    pub fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> VerifyResult {
        if signature.is_empty() || signature.len() != self.params.signature_size() {
            log::trace!("signature rejected");
            return Err(VerificationError::BadSignature);
        }

        match self
            .primitive
            .verify(message, signature, public_key.as_bytes())
        {
            Ok(()) => Ok(()),
            Err(_) => {
                log::trace!("signature rejected");
                Err(VerificationError::BadSignature)
            }
        }
    }
}

static DEFAULT: OnceLock<SignatureBoundary> = OnceLock::new();

/// The process-wide boundary over liboqs, built on first use
pub fn default_boundary() -> &'static SignatureBoundary {
    DEFAULT.get_or_init(SignatureBoundary::oqs)
}

/// Generate a key pair with the process-wide boundary
pub fn generate_keypair() -> KeyPair {
    default_boundary().generate_keypair()
}

/// Sign `message` with the process-wide boundary
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    default_boundary().sign(private_key, message)
}

/// Verify `signature` over `message` with the process-wide boundary
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> VerifyResult {
    default_boundary().verify(public_key, message, signature)
}
