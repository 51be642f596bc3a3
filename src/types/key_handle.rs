use bytes::Bytes;

use crate::types::Fingerprint;

/// Opaque reference to a key held by a key manager.
///
/// The composition layer only reads and validates handles, it never changes them.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct KeyHandle {
    #[debug("{} bytes", serialized.len())]
    serialized: Bytes,
    secret: bool,
    provider: String,
    fingerprint: Fingerprint,
}

impl KeyHandle {
    pub fn new(
        serialized: impl Into<Bytes>,
        secret: bool,
        provider: impl Into<String>,
        fingerprint: Fingerprint,
    ) -> Self {
        KeyHandle {
            serialized: serialized.into(),
            secret,
            provider: provider.into(),
            fingerprint,
        }
    }

    /// Handle to a public key.
    pub fn public(
        serialized: impl Into<Bytes>,
        provider: impl Into<String>,
        fingerprint: Fingerprint,
    ) -> Self {
        Self::new(serialized, false, provider, fingerprint)
    }

    /// Handle to a secret key.
    pub fn secret(
        serialized: impl Into<Bytes>,
        provider: impl Into<String>,
        fingerprint: Fingerprint,
    ) -> Self {
        Self::new(serialized, true, provider, fingerprint)
    }

    /// The serialized transferable key.
    pub fn serialized(&self) -> &Bytes {
        &self.serialized
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Identifier of the key manager backend that owns this key.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}
