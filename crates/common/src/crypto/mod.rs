//! Cryptographic engines executed by the worker thread
//!
//! - **Digests**: SHA-2 224/384/512, one-shot or streaming
//! - **Signatures**: Ed25519 keypair derivation from a 32 byte seed,
//!   detached signing and verification
//!
//! Everything here is pure and stateless. The worker runs one task at a
//!  time, so none of it needs internal locking.
//!
//! # Key Formats
//!
//! A keypair is derived from a 32 byte seed. The private key is the
//!  64 byte expanded form (`seed || public key`), the public key is the
//!  32 byte compressed Edwards point. Signing accepts any of the seed,
//!  the expanded private key, or an explicit pair (see [`KeyMaterial`]).

mod digest;
mod keys;
mod signing;

pub use digest::{digest, digest_with, Digester, ShaVariant};
pub use ed25519_dalek::Signature;
pub use keys::{
    KeyMaterial, KeyPair, PrivateKey, PublicKey, Seed, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
    SEED_SIZE,
};
pub use signing::{derive_keypair, sign, signature_from_hex, verify, SIGNATURE_SIZE};
