/*!
 * CRYSTALS-Dilithium signature boundary
 *
 * Typed key generation, signing and verification over a lattice-based
 * signature primitive, with fixed-size keys and signatures.
 */

pub mod boundary;
mod keys;

pub use boundary::{default_boundary, generate_keypair, sign, verify, SignatureBoundary};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
