//! Key management collaborator.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::Result;
use crate::signer::SignContext;
use crate::types::{Fingerprint, KeyBlock, KeyHandle};

/// How to look up keys in a key manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyQuery {
    Fingerprint(Fingerprint),
    Email(String),
    /// All keys owned by the given provider.
    Provider(String),
}

/// Key storage and private key operations.
///
/// Secret key material never leaves the implementation: signing happens
/// through [`KeyManager::sign`].
#[async_trait]
pub trait KeyManager: Send + Sync {
    /// Finds keys matching `query`.
    async fn lookup(&self, query: &KeyQuery) -> Result<Vec<KeyHandle>>;

    /// Lists all secret keys if `secret` is set, all public keys otherwise.
    async fn list_keys(&self, secret: bool) -> Result<Vec<KeyHandle>>;

    /// Confirms that `key` is a usable secret key and returns the handle of
    /// its public part.
    async fn public_key(&self, key: &KeyHandle) -> Result<KeyHandle>;

    /// Signs a digest with the secret key behind `key`.
    ///
    /// Returns the raw signature bytes.
    async fn sign(&self, key: &KeyHandle, context: &SignContext) -> Result<Bytes>;

    /// Stores parsed keys whose bindings have been verified, returning
    /// their fingerprints.
    async fn import_keys(&self, keys: &[KeyBlock]) -> Result<Vec<Fingerprint>>;
}
