/*!
 * Error types for the signature boundary
 *
 * Recoverable failures are ordinary `Result` errors with numeric codes and
 * user-facing messages. Failures that mean the linked primitive and the
 * declared scheme disagree are fatal and never returned; see [`fatal`].
 */

use thiserror::Error;

/// Error code constants for different error categories
pub mod error_codes {
    // Signature errors: 2000-2999
    pub const BAD_SIGNATURE: u32 = 2004;
    pub const INVALID_KEY_LENGTH: u32 = 2005;
    pub const KEY_GENERATION_FAILED: u32 = 2001;
    pub const SIGNING_FAILED: u32 = 2002;
    pub const INTERNAL_INVARIANT_VIOLATION: u32 = 2010;
    pub const SIZE_MISMATCH: u32 = 2011;
    pub const PRIMITIVE_UNAVAILABLE: u32 = 2012;

    // Configuration and encoding errors: 9000-9999
    pub const UNKNOWN_VARIANT: u32 = 9010;
    pub const ALREADY_INITIALIZED: u32 = 9011;
    pub const ARMOR_MISSING_HEADER: u32 = 9020;
    pub const ARMOR_MISSING_FOOTER: u32 = 9021;
    pub const ARMOR_BAD_BASE64: u32 = 9022;
    pub const ARMOR_WRONG_LENGTH: u32 = 9023;
    pub const PRIMITIVE_ERROR: u32 = 9003;
}

/// The only error verification ever returns.
///
/// Empty, wrong-length and cryptographically invalid signatures all map to
/// `BadSignature` so that callers learn nothing about which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("bad signature")]
    BadSignature,
}

impl VerificationError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            VerificationError::BadSignature => error_codes::BAD_SIGNATURE,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        "Signature could not be verified. Message authenticity cannot be established.".to_string()
    }
}

/// Which fixed-size value a length check was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    PublicKey,
    PrivateKey,
    Signature,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::PublicKey => write!(f, "public key"),
            KeyKind::PrivateKey => write!(f, "private key"),
            KeyKind::Signature => write!(f, "signature"),
        }
    }
}

/// Errors raised by the validated constructors of the fixed-size types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: KeyKind,
        expected: usize,
        actual: usize,
    },

    #[error("armor error: {0}")]
    Armor(#[from] ArmorError),
}

impl KeyError {
    pub fn invalid_length(kind: KeyKind, expected: usize, actual: usize) -> Self {
        KeyError::InvalidLength {
            kind,
            expected,
            actual,
        }
    }

    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            KeyError::InvalidLength { .. } => error_codes::INVALID_KEY_LENGTH,
            KeyError::Armor(e) => e.error_code(),
        }
    }
}

/// Errors decoding armored text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArmorError {
    #[error("missing armor header: {expected}")]
    MissingHeader { expected: String },

    #[error("missing armor footer: {expected}")]
    MissingFooter { expected: String },

    #[error("invalid base64 body: {0}")]
    InvalidBase64(String),

    #[error("armored {label} decodes to {actual} bytes, expected {expected}")]
    WrongLength {
        label: String,
        expected: usize,
        actual: usize,
    },
}

impl ArmorError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            ArmorError::MissingHeader { .. } => error_codes::ARMOR_MISSING_HEADER,
            ArmorError::MissingFooter { .. } => error_codes::ARMOR_MISSING_FOOTER,
            ArmorError::InvalidBase64(_) => error_codes::ARMOR_BAD_BASE64,
            ArmorError::WrongLength { .. } => error_codes::ARMOR_WRONG_LENGTH,
        }
    }
}

/// Errors installing the process-wide scheme configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown Dilithium variant: {0}")]
    UnknownVariant(String),

    #[error("scheme already initialized as {active}, cannot switch to {requested}")]
    AlreadyInitialized { active: String, requested: String },
}

impl ConfigError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            ConfigError::UnknownVariant(_) => error_codes::UNKNOWN_VARIANT,
            ConfigError::AlreadyInitialized { .. } => error_codes::ALREADY_INITIALIZED,
        }
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            ConfigError::UnknownVariant(_) => Some(
                "Use a supported Dilithium variant (dilithium2, dilithium3, or dilithium5)."
                    .to_string(),
            ),
            ConfigError::AlreadyInitialized { .. } => Some(
                "Select the variant once at process start, before any key is created.".to_string(),
            ),
        }
    }
}

/// Failure reported by the underlying signature primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signature primitive error: {0}")]
pub struct PrimitiveError(pub String);

impl PrimitiveError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        error_codes::PRIMITIVE_ERROR
    }
}

impl From<oqs::Error> for PrimitiveError {
    fn from(err: oqs::Error) -> Self {
        PrimitiveError(err.to_string())
    }
}

/// Conditions under which the boundary cannot safely continue.
///
/// These are never returned to callers. They are raised through [`fatal`],
/// which aborts the current operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("internal invariant violation: primitive produced a {kind} of {actual} bytes, declared size is {expected}")]
    InternalInvariantViolation {
        kind: KeyKind,
        expected: usize,
        actual: usize,
    },

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("scheme size mismatch for {variant}: declared {declared}, primitive uses {linked}")]
    SizeMismatch {
        variant: String,
        declared: String,
        linked: String,
    },

    #[error("signature primitive unavailable for {variant}: {cause}")]
    PrimitiveUnavailable { variant: String, cause: String },
}

impl FatalError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            FatalError::InternalInvariantViolation { .. } => {
                error_codes::INTERNAL_INVARIANT_VIOLATION
            }
            FatalError::KeyGeneration(_) => error_codes::KEY_GENERATION_FAILED,
            FatalError::Signing(_) => error_codes::SIGNING_FAILED,
            FatalError::SizeMismatch { .. } => error_codes::SIZE_MISMATCH,
            FatalError::PrimitiveUnavailable { .. } => error_codes::PRIMITIVE_UNAVAILABLE,
        }
    }
}

/// Abort the current operation on a fatal condition.
///
/// Logs the condition and panics. Continuing past any of these would produce
/// keys or signatures that do not match the declared scheme.
#[cold]
#[track_caller]
pub fn fatal(err: FatalError) -> ! {
    log::error!("fatal signature boundary error [{}]: {}", err.error_code(), err);
    panic!("{}", err)
}

/// Result of verifying a signature
pub type VerifyResult = Result<(), VerificationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            VerificationError::BadSignature.error_code(),
            error_codes::BAD_SIGNATURE
        );
        let err = KeyError::invalid_length(KeyKind::PublicKey, 1952, 10);
        assert_eq!(err.error_code(), error_codes::INVALID_KEY_LENGTH);
        let err = KeyError::from(ArmorError::InvalidBase64("x".to_string()));
        assert_eq!(err.error_code(), error_codes::ARMOR_BAD_BASE64);
    }

    #[test]
    fn test_bad_signature_message_is_opaque() {
        let message = VerificationError::BadSignature.to_string();
        assert_eq!(message, "bad signature");
        assert!(!message.contains("length"));
    }

    #[test]
    fn test_invalid_length_display() {
        let err = KeyError::invalid_length(KeyKind::PrivateKey, 4000, 3999);
        assert_eq!(
            err.to_string(),
            "invalid private key length: expected 4000 bytes, got 3999"
        );
    }

    #[test]
    fn test_remediation_suggestions() {
        let err = ConfigError::UnknownVariant("dilithium4".to_string());
        let suggestion = err.suggested_remediation();
        assert!(suggestion.is_some());
        assert!(suggestion.unwrap().contains("dilithium3"));
    }

    #[test]
    #[should_panic(expected = "internal invariant violation")]
    fn test_fatal_panics() {
        fatal(FatalError::InternalInvariantViolation {
            kind: KeyKind::Signature,
            expected: 3293,
            actual: 3292,
        });
    }
}
