/*!
 * Scheme parameters for CRYSTALS-Dilithium
 *
 * The variant, and with it every fixed size in the crate, is chosen once per
 * process and never changes afterwards.
 */

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use oqs::sig::Algorithm;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable read by [`SchemeConfig::from_env`]
pub const ENV_VARIANT: &str = "PQSIGN_VARIANT";

/// CRYSTALS-Dilithium algorithm variants with different security levels
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DilithiumVariant {
    /// Dilithium2 (NIST security level 2)
    Dilithium2,
    /// Dilithium3 (NIST security level 3, recommended)
    #[default]
    Dilithium3,
    /// Dilithium5 (NIST security level 5)
    Dilithium5,
}

impl fmt::Display for DilithiumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DilithiumVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dilithium2" | "2" => Ok(DilithiumVariant::Dilithium2),
            "dilithium3" | "3" => Ok(DilithiumVariant::Dilithium3),
            "dilithium5" | "5" => Ok(DilithiumVariant::Dilithium5),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

impl DilithiumVariant {
    pub const ALL: [DilithiumVariant; 3] = [
        DilithiumVariant::Dilithium2,
        DilithiumVariant::Dilithium3,
        DilithiumVariant::Dilithium5,
    ];

    /// Get the OQS algorithm name for this variant
    pub(crate) fn oqs_algorithm(&self) -> Algorithm {
        match self {
            DilithiumVariant::Dilithium2 => Algorithm::Dilithium2,
            DilithiumVariant::Dilithium3 => Algorithm::Dilithium3,
            DilithiumVariant::Dilithium5 => Algorithm::Dilithium5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DilithiumVariant::Dilithium2 => "Dilithium2",
            DilithiumVariant::Dilithium3 => "Dilithium3",
            DilithiumVariant::Dilithium5 => "Dilithium5",
        }
    }

    /// Get the security level of this variant
    pub fn security_level(&self) -> u8 {
        match self {
            DilithiumVariant::Dilithium2 => 2,
            DilithiumVariant::Dilithium3 => 3,
            DilithiumVariant::Dilithium5 => 5,
        }
    }

    /// Get the public key size for this variant in bytes
    pub fn public_key_size(&self) -> usize {
        match self {
            DilithiumVariant::Dilithium2 => 1312,
            DilithiumVariant::Dilithium3 => 1952,
            DilithiumVariant::Dilithium5 => 2592,
        }
    }

    /// Get the private key size for this variant in bytes
    pub fn private_key_size(&self) -> usize {
        match self {
            DilithiumVariant::Dilithium2 => 2528,
            DilithiumVariant::Dilithium3 => 4000,
            DilithiumVariant::Dilithium5 => 4864,
        }
    }

    /// Get the signature size for this variant in bytes
    pub fn signature_size(&self) -> usize {
        match self {
            DilithiumVariant::Dilithium2 => 2420,
            DilithiumVariant::Dilithium3 => 3293,
            DilithiumVariant::Dilithium5 => 4595,
        }
    }

    /// The declared sizes of every fixed-length type for this variant
    pub fn sizes(&self) -> SchemeSizes {
        SchemeSizes {
            public_key: self.public_key_size(),
            private_key: self.private_key_size(),
            signature: self.signature_size(),
        }
    }
}

/// Byte lengths of the three fixed-size types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SchemeSizes {
    pub public_key: usize,
    pub private_key: usize,
    pub signature: usize,
}

impl fmt::Display for SchemeSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pk={} sk={} sig={}",
            self.public_key, self.private_key, self.signature
        )
    }
}

/// Process configuration for the signature boundary
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemeConfig {
    #[serde(default)]
    pub variant: DilithiumVariant,
}

impl SchemeConfig {
    pub fn new(variant: DilithiumVariant) -> Self {
        Self { variant }
    }

    /// Read the variant from `PQSIGN_VARIANT`, falling back to the default
    /// when the variable is unset or empty
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(ENV_VARIANT).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(name) => Ok(Self::new(name.parse()?)),
        }
    }
}

/// The resolved, immutable parameters the whole process signs with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemeParams {
    variant: DilithiumVariant,
    sizes: SchemeSizes,
}

impl SchemeParams {
    fn resolve(config: SchemeConfig) -> Self {
        let params = Self {
            variant: config.variant,
            sizes: config.variant.sizes(),
        };
        log::info!(
            "signature scheme resolved: {} ({})",
            params.variant,
            params.sizes
        );
        params
    }

    pub fn variant(&self) -> DilithiumVariant {
        self.variant
    }

    pub fn sizes(&self) -> SchemeSizes {
        self.sizes
    }

    /// `PUBLIC_KEY_SIZE` for the active variant
    pub fn public_key_size(&self) -> usize {
        self.sizes.public_key
    }

    /// `PRIVATE_KEY_SIZE` for the active variant
    pub fn private_key_size(&self) -> usize {
        self.sizes.private_key
    }

    /// `SIGNATURE_SIZE` for the active variant
    pub fn signature_size(&self) -> usize {
        self.sizes.signature
    }
}

static ACTIVE: OnceLock<SchemeParams> = OnceLock::new();

/// The active scheme parameters, resolving the default on first use
pub fn active() -> &'static SchemeParams {
    ACTIVE.get_or_init(|| SchemeParams::resolve(SchemeConfig::default()))
}

/// Install `config` as the process-wide configuration.
///
/// Installing the configuration that is already active is a no-op. Any other
/// configuration is rejected once parameters have been resolved.
pub fn install(config: SchemeConfig) -> Result<&'static SchemeParams, ConfigError> {
    let params = ACTIVE.get_or_init(|| SchemeParams::resolve(config));
    if params.variant != config.variant {
        return Err(ConfigError::AlreadyInitialized {
            active: params.variant.to_string(),
            requested: config.variant.to_string(),
        });
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_sizes() {
        let sizes = DilithiumVariant::Dilithium3.sizes();
        assert_eq!(sizes.public_key, 1952);
        assert_eq!(sizes.private_key, 4000);
        assert_eq!(sizes.signature, 3293);

        for variant in DilithiumVariant::ALL {
            assert!(variant.private_key_size() > variant.public_key_size());
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(
            "dilithium2".parse::<DilithiumVariant>().unwrap(),
            DilithiumVariant::Dilithium2
        );
        assert_eq!(
            " Dilithium5 ".parse::<DilithiumVariant>().unwrap(),
            DilithiumVariant::Dilithium5
        );
        assert_eq!("3".parse::<DilithiumVariant>().unwrap(), DilithiumVariant::Dilithium3);
        assert!(matches!(
            "dilithium4".parse::<DilithiumVariant>(),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_config_from_env_value() {
        assert_eq!(SchemeConfig::from_env_value(None).unwrap(), SchemeConfig::default());
        assert_eq!(SchemeConfig::from_env_value(Some("  ")).unwrap(), SchemeConfig::default());
        assert_eq!(
            SchemeConfig::from_env_value(Some("dilithium5")).unwrap().variant,
            DilithiumVariant::Dilithium5
        );
        assert!(SchemeConfig::from_env_value(Some("rsa")).is_err());
    }

    #[test]
    fn test_config_serde() {
        let config: SchemeConfig = serde_json::from_str(r#"{"variant":"dilithium2"}"#).unwrap();
        assert_eq!(config.variant, DilithiumVariant::Dilithium2);

        let config: SchemeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.variant, DilithiumVariant::Dilithium3);
    }

    #[test]
    fn test_install_rejects_conflicting_variant() {
        let params = active();
        assert_eq!(params.variant(), DilithiumVariant::default());

        assert!(install(SchemeConfig::default()).is_ok());
        let err = install(SchemeConfig::new(DilithiumVariant::Dilithium5)).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyInitialized { .. }));
        assert_eq!(active().variant(), DilithiumVariant::Dilithium3);
    }
}
