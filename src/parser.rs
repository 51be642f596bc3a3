//! Key-block parser collaborator.

use crate::errors::Result;
use crate::types::{KeyBlock, KeyDescription};

/// Parses and checks serialized transferable keys.
///
/// The packet format lives behind this trait; this crate never looks inside
/// the bytes it hands over.
pub trait KeyParser: Send + Sync {
    /// Parses exactly one transferable key from `bytes`.
    fn parse_key(&self, bytes: &[u8]) -> Result<KeyBlock>;

    /// Parses all transferable keys found in `bytes`.
    ///
    /// Yields one entry per block in input order. A block that fails to
    /// parse yields an `Err` without stopping the blocks after it.
    fn parse_keys(&self, bytes: &[u8]) -> Result<Vec<Result<KeyBlock>>>;

    /// Cross-validates the self signatures and binding signatures of `key`.
    fn verify_bindings(&self, key: &KeyBlock) -> Result<()>;

    /// Extracts a human readable description of `key`.
    fn describe(&self, key: &KeyBlock) -> Result<KeyDescription>;
}
