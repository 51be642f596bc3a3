//! Pre-processing of serialized keys for description and import.

use bytes::Bytes;
use log::{debug, warn};

use crate::armor;
use crate::errors::Result;
use crate::parser::KeyParser;
use crate::types::{KeyBlock, KeyDescription};

/// A key serialization as supplied by a caller.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub enum KeyData {
    /// One or more ASCII armored blocks.
    #[debug("Armored({} bytes)", _0.len())]
    Armored(String),
    #[debug("Binary({} bytes)", _0.len())]
    Binary(Bytes),
}

impl From<String> for KeyData {
    fn from(value: String) -> Self {
        KeyData::Armored(value)
    }
}

impl From<&str> for KeyData {
    fn from(value: &str) -> Self {
        KeyData::Armored(value.to_string())
    }
}

impl From<Vec<u8>> for KeyData {
    fn from(value: Vec<u8>) -> Self {
        KeyData::Binary(value.into())
    }
}

impl From<Bytes> for KeyData {
    fn from(value: Bytes) -> Self {
        KeyData::Binary(value)
    }
}

impl KeyData {
    /// Raw key bytes; armored text is dearmored block by block.
    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            KeyData::Armored(text) => Ok(armor::dearmor_all(&text)?.into()),
            KeyData::Binary(bytes) => Ok(bytes),
        }
    }
}

/// Parses every key in `bytes`, skipping blocks that fail to parse or verify.
///
/// Fails with [`Error::Parse`](crate::errors::Error::Parse) if no block survives.
pub fn parse_valid_keys(parser: &dyn KeyParser, bytes: &[u8]) -> Result<Vec<KeyBlock>> {
    let mut keys = Vec::new();
    for (i, parsed) in parser.parse_keys(bytes)?.into_iter().enumerate() {
        let key = match parsed {
            Ok(key) => key,
            Err(err) => {
                warn!("skipping key block {}: {}", i, err);
                continue;
            }
        };
        if let Err(err) = parser.verify_bindings(&key) {
            warn!("skipping key {}: {}", key.fingerprint(), err);
            continue;
        }
        keys.push(key);
    }

    if keys.is_empty() {
        parse_err!("No valid key blocks found");
    }
    debug!("parsed {} valid keys", keys.len());

    Ok(keys)
}

/// Describes every valid key in `data`.
pub fn describe_keys(parser: &dyn KeyParser, data: KeyData) -> Result<Vec<KeyDescription>> {
    let bytes = data.into_bytes()?;
    parse_valid_keys(parser, &bytes)?
        .iter()
        .map(|key| parser.describe(key))
        .collect()
}
