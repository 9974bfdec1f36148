use std::fmt;

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use crate::error::{Error, Result};

/// Size of an Ed25519 seed in bytes
pub const SEED_SIZE: usize = 32;
/// Size of an Ed25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of an expanded Ed25519 private key (seed || public key) in bytes
pub const PRIVATE_KEY_SIZE: usize = 64;

fn decode_hex<const N: usize>(hex: &str, what: &'static str) -> Result<[u8; N]> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() != N * 2 {
        return Err(Error::length(what, N, hex.len() / 2));
    }
    let mut buff = [0; N];
    hex::decode_to_slice(hex, &mut buff)
        .map_err(|e| Error::InvalidKeyMaterial(format!("{what} hex decode error: {e}")))?;
    Ok(buff)
}

fn copy_exact<const N: usize>(bytes: &[u8], what: &'static str) -> Result<[u8; N]> {
    if bytes.len() != N {
        return Err(Error::length(what, N, bytes.len()));
    }
    let mut buff = [0; N];
    buff.copy_from_slice(bytes);
    Ok(buff)
}

/// 32 bytes of secret entropy from which a keypair is derived
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed(#[serde_as(as = "Hex")] [u8; SEED_SIZE]);

impl From<[u8; SEED_SIZE]> for Seed {
    fn from(bytes: [u8; SEED_SIZE]) -> Self {
        Seed(bytes)
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, "seed").map(Seed)
    }
}

impl Seed {
    /// Generate a new random seed using the OS RNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SEED_SIZE];
        getrandom::getrandom(&mut bytes).expect("failed to generate random bytes");
        Seed(bytes)
    }

    /// Parse a seed from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self> {
        decode_hex(hex, "seed").map(Seed)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Ed25519 public key
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Hex")] [u8; PUBLIC_KEY_SIZE]);

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, "public key").map(PublicKey)
    }
}

impl PublicKey {
    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self> {
        decode_hex(hex, "public key").map(PublicKey)
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Expanded Ed25519 private key: the 32 byte seed followed by the
///  32 byte public key it derives.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey(#[serde_as(as = "Hex")] [u8; PRIVATE_KEY_SIZE]);

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, "private key").map(PrivateKey)
    }
}

impl PrivateKey {
    /// Parse a private key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self> {
        decode_hex(hex, "private key").map(PrivateKey)
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The seed half of the key
    pub fn seed(&self) -> Seed {
        let mut seed = [0u8; SEED_SIZE];
        seed.copy_from_slice(&self.0[..SEED_SIZE]);
        Seed(seed)
    }

    /// The public half of the key, as stored (not re-derived)
    pub fn public_key(&self) -> PublicKey {
        let mut public = [0u8; PUBLIC_KEY_SIZE];
        public.copy_from_slice(&self.0[SEED_SIZE..]);
        PublicKey(public)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(public={})", self.public_key().to_hex())
    }
}

/// An Ed25519 keypair derived from a seed
///
/// Only produced by [`KeyPair::derive`] (or deserialised from one that was),
///  so the two halves always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Derive the keypair for a seed. Deterministic: the same seed always
    ///  yields byte-identical keys.
    pub fn derive(seed: &Seed) -> Self {
        let signing_key = SigningKey::from_bytes(seed.as_bytes());
        KeyPair {
            public_key: PublicKey(signing_key.verifying_key().to_bytes()),
            private_key: PrivateKey(signing_key.to_keypair_bytes()),
        }
    }

    pub fn generate() -> Self {
        Self::derive(&Seed::generate())
    }
}

/// Key material accepted by signing
///
/// Carries raw bytes exactly as received; lengths are checked when the
///  material is used, so a malformed key surfaces as
///  [`Error::InvalidKeyMaterial`] through the task's completion. The two
///  halves of a private key are not checked against each other.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// A 32 byte seed; the keypair is derived before signing
    Seed(Vec<u8>),
    /// A 64 byte expanded private key
    PrivateKey(Vec<u8>),
    /// An explicit keypair
    KeyPair {
        private_key: Vec<u8>,
        public_key: Vec<u8>,
    },
}

impl KeyMaterial {
    /// Classify a bare key buffer by its length: 32 bytes is a seed,
    ///  64 bytes an expanded private key.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        match bytes.len() {
            SEED_SIZE => Ok(KeyMaterial::Seed(bytes)),
            PRIVATE_KEY_SIZE => Ok(KeyMaterial::PrivateKey(bytes)),
            got => Err(Error::InvalidKeyMaterial(format!(
                "expected a {SEED_SIZE} byte seed or {PRIVATE_KEY_SIZE} byte private key, got {got} bytes"
            ))),
        }
    }

    /// The 64 byte private key signing uses. A seed is expanded first; an
    ///  explicit pair signs with its private key as given.
    pub(crate) fn private_key(&self) -> Result<PrivateKey> {
        match self {
            KeyMaterial::Seed(seed) => {
                let seed = Seed::try_from(seed.as_slice()).map_err(invalid_key)?;
                Ok(KeyPair::derive(&seed).private_key)
            }
            KeyMaterial::PrivateKey(private_key) => {
                PrivateKey::try_from(private_key.as_slice()).map_err(invalid_key)
            }
            KeyMaterial::KeyPair {
                private_key,
                public_key,
            } => {
                PublicKey::try_from(public_key.as_slice()).map_err(invalid_key)?;
                PrivateKey::try_from(private_key.as_slice()).map_err(invalid_key)
            }
        }
    }
}

fn invalid_key(err: Error) -> Error {
    match err {
        Error::InvalidKeyMaterial(_) => err,
        other => Error::InvalidKeyMaterial(other.to_string()),
    }
}

impl From<Seed> for KeyMaterial {
    fn from(seed: Seed) -> Self {
        KeyMaterial::Seed(seed.0.to_vec())
    }
}

impl From<&Seed> for KeyMaterial {
    fn from(seed: &Seed) -> Self {
        KeyMaterial::Seed(seed.0.to_vec())
    }
}

impl From<PrivateKey> for KeyMaterial {
    fn from(key: PrivateKey) -> Self {
        KeyMaterial::PrivateKey(key.0.to_vec())
    }
}

impl From<&KeyPair> for KeyMaterial {
    fn from(pair: &KeyPair) -> Self {
        KeyMaterial::KeyPair {
            private_key: pair.private_key.0.to_vec(),
            public_key: pair.public_key.0.to_vec(),
        }
    }
}

impl From<KeyPair> for KeyMaterial {
    fn from(pair: KeyPair) -> Self {
        KeyMaterial::from(&pair)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Seed(b) => write!(f, "KeyMaterial::Seed({} bytes)", b.len()),
            KeyMaterial::PrivateKey(b) => write!(f, "KeyMaterial::PrivateKey({} bytes)", b.len()),
            KeyMaterial::KeyPair { public_key, .. } => {
                write!(f, "KeyMaterial::KeyPair(public={})", hex::encode(public_key))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SEED: &str = "af9881fe34edfd3463cf3e14e22ad95a0608967e084d3ca1fc57be023040de59";
    const PUBLIC_KEY: &str = "0c32c468980d40237f4e44a66dec3beb564b3e1394a4c6df1da2065e3afc1d81";

    #[test]
    fn test_derive_known_seed() {
        let pair = KeyPair::derive(&Seed::from_hex(SEED).unwrap());
        assert_eq!(pair.public_key.to_hex(), PUBLIC_KEY);
        assert_eq!(pair.private_key.to_hex(), format!("{SEED}{PUBLIC_KEY}"));
        assert_eq!(pair.private_key.seed().to_hex(), SEED);
        assert_eq!(pair.private_key.public_key(), pair.public_key);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let seed = Seed::generate();
        assert_eq!(KeyPair::derive(&seed), KeyPair::derive(&seed));
    }

    #[test]
    fn test_hex_prefix_and_lengths() {
        let prefixed = format!("0x{PUBLIC_KEY}");
        assert_eq!(
            PublicKey::from_hex(&prefixed).unwrap(),
            PublicKey::from_hex(PUBLIC_KEY).unwrap()
        );
        assert_eq!(
            Seed::from_hex("abcd"),
            Err(Error::InvalidArgumentLength {
                what: "seed",
                expected: 32,
                got: 2
            })
        );
        assert!(matches!(
            Seed::from_hex(&"zz".repeat(32)),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(Seed::try_from(&[0u8; 31][..]).is_err());
        assert!(PrivateKey::try_from(&[0u8; 65][..]).is_err());
    }

    #[test]
    fn test_key_material_from_bytes() {
        assert!(matches!(
            KeyMaterial::from_bytes(vec![1u8; 32]),
            Ok(KeyMaterial::Seed(_))
        ));
        assert!(matches!(
            KeyMaterial::from_bytes(vec![1u8; 64]),
            Ok(KeyMaterial::PrivateKey(_))
        ));
        assert!(matches!(
            KeyMaterial::from_bytes(vec![1u8; 33]),
            Err(Error::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_well_formed_keys_used_as_given() {
        let pair = KeyPair::generate();
        let other = KeyPair::generate();
        let material = KeyMaterial::KeyPair {
            private_key: pair.private_key.to_bytes().to_vec(),
            public_key: other.public_key.to_bytes().to_vec(),
        };
        assert_eq!(material.private_key().unwrap(), pair.private_key);

        let mut tampered = pair.private_key.to_bytes();
        tampered[63] ^= 1;
        let material = KeyMaterial::PrivateKey(tampered.to_vec());
        assert_eq!(material.private_key().unwrap().to_bytes(), tampered);

        let material = KeyMaterial::KeyPair {
            private_key: pair.private_key.to_bytes().to_vec(),
            public_key: vec![0u8; 31],
        };
        assert!(matches!(
            material.private_key(),
            Err(Error::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_serde_hex() {
        let pair = KeyPair::derive(&Seed::from_hex(SEED).unwrap());
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["publicKey"], PUBLIC_KEY);
        let recovered: KeyPair = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, pair);
    }
}
