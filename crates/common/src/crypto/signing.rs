//! Ed25519 keypair derivation, detached signing and verification.
//!
//! These are plain functions; the worker calls them for queued tasks and
//!  callers that don't need off-thread execution can call them directly.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::{clamp_integer, Scalar};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha512};

use super::keys::{KeyMaterial, KeyPair, PrivateKey, Seed, PUBLIC_KEY_SIZE, SEED_SIZE};
use crate::error::{Error, Result};

/// Size of a detached Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Derive a keypair from a 32 byte seed.
pub fn derive_keypair(seed: &[u8]) -> Result<KeyPair> {
    let seed = Seed::try_from(seed)?;
    Ok(KeyPair::derive(&seed))
}

/// Produce a detached signature over `message`.
///
/// Signing with a seed is identical to deriving the keypair first and
///  signing with its private key. A 64 byte private key is used as given:
///  its public half goes into the challenge hash without being checked
///  against the seed.
pub fn sign(message: &[u8], key: &KeyMaterial) -> Result<Signature> {
    let private_key = key.private_key()?;
    Ok(sign_expanded(&private_key, message))
}

fn sign_expanded(private_key: &PrivateKey, message: &[u8]) -> Signature {
    let bytes = private_key.to_bytes();
    let (seed, public_key) = bytes.split_at(SEED_SIZE);

    let h = Sha512::digest(seed);
    let mut scalar_bytes = [0u8; 32];
    scalar_bytes.copy_from_slice(&h[..32]);
    let a = Scalar::from_bytes_mod_order(clamp_integer(scalar_bytes));

    let r = wide_scalar(Sha512::new().chain_update(&h[32..]).chain_update(message));
    let big_r = EdwardsPoint::mul_base(&r).compress();
    let k = wide_scalar(
        Sha512::new()
            .chain_update(big_r.as_bytes())
            .chain_update(public_key)
            .chain_update(message),
    );
    let s = k * a + r;

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    Signature::from_bytes(&signature)
}

fn wide_scalar(hasher: Sha512) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Check a detached signature.
///
/// Returns `Ok(false)` for a well-formed but wrong signature or a public key
///  that is not a valid curve point. Only wrong byte lengths are errors.
///
/// The check is the cofactorless `[S]B = R + [k]A` equation; small order
///  keys and `R` values are not rejected, and `S` only needs its top three
///  bits clear.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool> {
    let signature: [u8; SIGNATURE_SIZE] = signature
        .try_into()
        .map_err(|_| Error::length("signature", SIGNATURE_SIZE, signature.len()))?;
    let public_key: [u8; PUBLIC_KEY_SIZE] = public_key
        .try_into()
        .map_err(|_| Error::length("public key", PUBLIC_KEY_SIZE, public_key.len()))?;

    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key) else {
        return Ok(false);
    };
    let signature = Signature::from_bytes(&signature);
    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Parse a signature from a hexadecimal string
///
/// Accepts both plain hex and "0x"-prefixed hex strings.
pub fn signature_from_hex(hex: &str) -> Result<Signature> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes = hex::decode(hex)
        .map_err(|e| Error::InvalidKeyMaterial(format!("signature hex decode error: {e}")))?;
    let bytes: [u8; SIGNATURE_SIZE] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::length("signature", SIGNATURE_SIZE, bytes.len()))?;
    Ok(Signature::from_bytes(&bytes))
}
