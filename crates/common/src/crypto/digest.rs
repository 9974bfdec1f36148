//! SHA-2 digests
//!
//! Only the 224, 384 and 512 bit variants are exposed. Anything else,
//!  256 included, is rejected with [`Error::InvalidVariant`].

use std::fmt;

use sha2::{Digest, Sha224, Sha384, Sha512};

use crate::error::{Error, Result};

/// Supported SHA-2 output sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaVariant {
    Sha224,
    Sha384,
    Sha512,
}

impl ShaVariant {
    /// Output size in bits
    pub fn bits(&self) -> u16 {
        match self {
            ShaVariant::Sha224 => 224,
            ShaVariant::Sha384 => 384,
            ShaVariant::Sha512 => 512,
        }
    }

    /// Output size in bytes
    pub fn output_size(&self) -> usize {
        self.bits() as usize / 8
    }
}

impl TryFrom<u16> for ShaVariant {
    type Error = Error;
    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            224 => Ok(ShaVariant::Sha224),
            384 => Ok(ShaVariant::Sha384),
            512 => Ok(ShaVariant::Sha512),
            other => Err(Error::InvalidVariant(other)),
        }
    }
}

impl fmt::Display for ShaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha{}", self.bits())
    }
}

/// Hash `data` with the SHA-2 variant named by its bit size.
pub fn digest(bits: u16, data: &[u8]) -> Result<Vec<u8>> {
    let variant = ShaVariant::try_from(bits)?;
    Ok(digest_with(variant, data))
}

/// Hash `data` with an already validated variant.
pub fn digest_with(variant: ShaVariant, data: &[u8]) -> Vec<u8> {
    let mut digester = Digester::new(variant);
    digester.update(data);
    digester.finalize()
}

/// Incremental SHA-2 hasher
///
/// Feeding the input in any number of `update` calls yields the same
///  output as a single [`digest`] over the concatenation.
#[derive(Clone)]
pub struct Digester {
    state: DigesterState,
}

#[derive(Clone)]
enum DigesterState {
    Sha224(Sha224),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Digester {
    pub fn new(variant: ShaVariant) -> Self {
        let state = match variant {
            ShaVariant::Sha224 => DigesterState::Sha224(Sha224::new()),
            ShaVariant::Sha384 => DigesterState::Sha384(Sha384::new()),
            ShaVariant::Sha512 => DigesterState::Sha512(Sha512::new()),
        };
        Self { state }
    }

    pub fn variant(&self) -> ShaVariant {
        match self.state {
            DigesterState::Sha224(_) => ShaVariant::Sha224,
            DigesterState::Sha384(_) => ShaVariant::Sha384,
            DigesterState::Sha512(_) => ShaVariant::Sha512,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            DigesterState::Sha224(h) => h.update(data),
            DigesterState::Sha384(h) => h.update(data),
            DigesterState::Sha512(h) => h.update(data),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        match self.state {
            DigesterState::Sha224(h) => h.finalize().to_vec(),
            DigesterState::Sha384(h) => h.finalize().to_vec(),
            DigesterState::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

impl fmt::Debug for Digester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digester")
            .field("variant", &self.variant())
            .finish_non_exhaustive()
    }
}
