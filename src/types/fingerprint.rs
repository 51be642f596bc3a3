use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// Represents a Fingerprint.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, derive_more::Debug)]
pub enum Fingerprint {
    #[debug("{}", hex::encode(_0))]
    V4([u8; 20]),
    #[debug("{}", hex::encode(_0))]
    V6([u8; 32]),

    #[debug("{}", hex::encode(_0))]
    /// Fingerprint with unknown key version
    Other(Vec<u8>),
}

impl Fingerprint {
    /// Picks the key version from the length of `fp`.
    pub fn new(fp: &[u8]) -> Self {
        if let Ok(fp) = <[u8; 20]>::try_from(fp) {
            return Fingerprint::V4(fp);
        }
        if let Ok(fp) = <[u8; 32]>::try_from(fp) {
            return Fingerprint::V6(fp);
        }
        Fingerprint::Other(fp.to_vec())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::V4(_) => 20,
            Self::V6(_) => 32,
            Self::Other(fp) => fp.len(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::V4(fp) => &fp[..],
            Self::V6(fp) => &fp[..],
            Self::Other(fp) => fp,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.as_bytes()))
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = hex::decode(&cleaned).map_err(|e| Error::Parse {
            message: format!("invalid fingerprint {s:?}: {e}"),
        })?;
        Ok(Fingerprint::new(&bytes))
    }
}
