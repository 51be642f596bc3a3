use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::types::Fingerprint;

/// Kind of a parsed transferable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum KeyKind {
    #[display("public key")]
    Public,
    #[display("secret key")]
    Secret,
}

/// A parsed transferable key: primary key, subkeys, user ids and their signatures.
///
/// Produced by a [`KeyParser`](crate::parser::KeyParser). The packets are kept
/// in serialized form so that builders can consume them without this layer
/// knowing the packet format.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct KeyBlock {
    kind: KeyKind,
    fingerprint: Fingerprint,
    user_ids: Vec<String>,
    #[debug("{} bytes", packets.len())]
    packets: Bytes,
}

impl KeyBlock {
    pub fn new(
        kind: KeyKind,
        fingerprint: Fingerprint,
        user_ids: Vec<String>,
        packets: impl Into<Bytes>,
    ) -> Self {
        KeyBlock {
            kind,
            fingerprint,
            user_ids,
            packets: packets.into(),
        }
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn is_public(&self) -> bool {
        self.kind == KeyKind::Public
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }

    pub fn packets(&self) -> &Bytes {
        &self.packets
    }
}

/// A public key block whose self and binding signatures have been checked.
///
/// Only [`validate_public_key`](crate::validate::validate_public_key) creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyBlock(KeyBlock);

impl PublicKeyBlock {
    pub(crate) fn new_verified(block: KeyBlock) -> Self {
        debug_assert!(block.is_public());
        PublicKeyBlock(block)
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        self.0.fingerprint()
    }

    pub fn user_ids(&self) -> &[String] {
        self.0.user_ids()
    }

    pub fn packets(&self) -> &Bytes {
        self.0.packets()
    }
}

impl AsRef<KeyBlock> for PublicKeyBlock {
    fn as_ref(&self) -> &KeyBlock {
        &self.0
    }
}

/// Human readable summary of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescription {
    pub fingerprint: Fingerprint,
    pub kind: KeyKind,
    pub user_ids: Vec<String>,
    /// Public key algorithm name, as reported by the parser.
    pub algorithm: String,
    pub created_at: Option<DateTime<Utc>>,
    pub subkeys: usize,
}
