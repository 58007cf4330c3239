/*!
 * The external signature primitive
 *
 * The boundary never does lattice arithmetic itself. Everything it needs from
 * the scheme goes through [`SignaturePrimitive`]: key generation, signing,
 * verification and the sizes the linked implementation actually uses.
 */

use std::sync::Mutex;

use oqs::sig::Sig;
use zeroize::Zeroizing;

use crate::error::PrimitiveError;
use crate::params::{DilithiumVariant, SchemeSizes};

/// Operations the boundary delegates to the underlying signature scheme.
///
/// Implementations see raw byte slices only. They are not expected to bound
/// check signature lengths; the boundary does that before every call.
pub trait SignaturePrimitive {
    /// The byte lengths this implementation reads and writes
    fn sizes(&self) -> Result<SchemeSizes, PrimitiveError>;

    /// Generate a fresh `(public_key, private_key)` pair
    fn keypair(&self) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>), PrimitiveError>;

    /// Sign `message`; the length of the returned vector is the produced length
    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, PrimitiveError>;

    /// `Ok(())` when the signature is valid, any error otherwise
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveError>;
}

/// CRYSTALS-Dilithium as implemented by liboqs.
///
/// A fresh `Sig` handle is created for every call, so no liboqs state is
/// shared between threads. liboqs draws key generation entropy from the OS
/// random source.
#[derive(Debug, Clone, Copy)]
pub struct OqsPrimitive {
    variant: DilithiumVariant,
}

impl OqsPrimitive {
    pub fn new(variant: DilithiumVariant) -> Self {
        oqs::init();
        Self { variant }
    }

    pub fn variant(&self) -> DilithiumVariant {
        self.variant
    }

    fn sig(&self) -> Result<Sig, PrimitiveError> {
        Ok(Sig::new(self.variant.oqs_algorithm())?)
    }
}

impl SignaturePrimitive for OqsPrimitive {
    fn sizes(&self) -> Result<SchemeSizes, PrimitiveError> {
        let sig = self.sig()?;
        Ok(SchemeSizes {
            public_key: sig.length_public_key(),
            private_key: sig.length_secret_key(),
            signature: sig.length_signature(),
        })
    }

    fn keypair(&self) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>), PrimitiveError> {
        let sig = self.sig()?;
        let (public_key, secret_key) = sig.keypair()?;
        Ok((public_key.into_vec(), Zeroizing::new(secret_key.into_vec())))
    }

    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        let sig = self.sig()?;
        let sk = sig
            .secret_key_from_bytes(private_key)
            .ok_or_else(|| PrimitiveError("Failed to create secret key from bytes".to_string()))?;
        let signature = sig.sign(message, &sk)?;
        Ok(signature.into_vec())
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveError> {
        let sig = self.sig()?;
        let pk = sig
            .public_key_from_bytes(public_key)
            .ok_or_else(|| PrimitiveError("Failed to create public key from bytes".to_string()))?;
        let sig_obj = sig
            .signature_from_bytes(signature)
            .ok_or_else(|| PrimitiveError("Failed to create signature from bytes".to_string()))?;
        sig.verify(message, &sig_obj, &pk)?;
        Ok(())
    }
}

/// Serializes every call into a primitive that is not reentrant.
pub struct SerializedPrimitive<P> {
    inner: Mutex<P>,
}

impl<P> SerializedPrimitive<P> {
    pub fn new(primitive: P) -> Self {
        Self {
            inner: Mutex::new(primitive),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&P) -> T) -> T {
        // the guarded primitive holds no partial state
        let guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&*guard)
    }
}

impl<P: SignaturePrimitive> SignaturePrimitive for SerializedPrimitive<P> {
    fn sizes(&self) -> Result<SchemeSizes, PrimitiveError> {
        self.with(|p| p.sizes())
    }

    fn keypair(&self) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>), PrimitiveError> {
        self.with(|p| p.keypair())
    }

    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        self.with(|p| p.sign(message, private_key))
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), PrimitiveError> {
        self.with(|p| p.verify(message, signature, public_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oqs_sizes_match_declared() {
        for variant in DilithiumVariant::ALL {
            let primitive = OqsPrimitive::new(variant);
            assert_eq!(primitive.sizes().unwrap(), variant.sizes(), "{}", variant);
        }
    }

    #[test]
    fn test_oqs_roundtrip() {
        let primitive = OqsPrimitive::new(DilithiumVariant::Dilithium2);
        let (pk, sk) = primitive.keypair().unwrap();
        let signature = primitive.sign(b"primitive", &sk).unwrap();
        assert_eq!(signature.len(), DilithiumVariant::Dilithium2.signature_size());
        assert!(primitive.verify(b"primitive", &signature, &pk).is_ok());
        assert!(primitive.verify(b"primitivE", &signature, &pk).is_err());
    }

    #[test]
    fn test_serialized_delegates() {
        let primitive = SerializedPrimitive::new(OqsPrimitive::new(DilithiumVariant::Dilithium2));
        let (pk, sk) = primitive.keypair().unwrap();
        let signature = primitive.sign(b"", &sk).unwrap();
        assert!(primitive.verify(b"", &signature, &pk).is_ok());
        assert_eq!(
            primitive.sizes().unwrap(),
            DilithiumVariant::Dilithium2.sizes()
        );
    }
}
