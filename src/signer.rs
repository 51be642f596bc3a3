//! Signing capabilities and the surrogate signer factory.
//!
//! A [`SurrogateKey`] stands in for a secret key: it knows the public
//! identity of the key and forwards every signing request to the
//! [`KeyManager`] that holds the private material.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::try_join_all;
use log::debug;

use crate::errors::Result;
use crate::key_manager::KeyManager;
use crate::types::{Fingerprint, HashAlgorithm, KeyHandle};

/// What the signature is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    /// Binary document signature.
    Binary,
    /// Canonical text signature, used by the cleartext framework.
    Text,
}

/// A single signing request.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct SignContext {
    pub hash_alg: HashAlgorithm,
    pub signature_type: SignatureType,
    /// Digest of the signed data and the hashed signature subpackets.
    #[debug("{}", hex::encode(digest))]
    pub digest: Bytes,
}

/// Anything able to produce signatures for one key.
#[async_trait]
pub trait SigningCapability: Send + Sync + fmt::Debug {
    /// Handle of the public key matching the signing key.
    fn public_key(&self) -> &KeyHandle;

    fn fingerprint(&self) -> &Fingerprint {
        self.public_key().fingerprint()
    }

    /// Hash algorithm signatures should be made with.
    fn hash_alg(&self) -> HashAlgorithm {
        HashAlgorithm::default()
    }

    /// Signs `context.digest`, returning the raw signature bytes.
    async fn sign(&self, context: &SignContext) -> Result<Bytes>;
}

/// Secret key stand-in that delegates signing to its key manager.
#[derive(derive_more::Debug)]
pub struct SurrogateKey {
    secret: KeyHandle,
    public: KeyHandle,
    hash_alg: HashAlgorithm,
    #[debug(skip)]
    keys: Arc<dyn KeyManager>,
}

impl SurrogateKey {
    /// Creates a surrogate for the secret key `secret`.
    ///
    /// Asks the key manager to confirm the key, which also yields the public
    /// identity used in signatures.
    pub async fn new(keys: Arc<dyn KeyManager>, secret: KeyHandle) -> Result<Self> {
        if !secret.is_secret() {
            invalid_args_err!(
                "signing key {} is not a secret key",
                secret.fingerprint()
            );
        }

        let public = keys.public_key(&secret).await?;
        debug!(
            "surrogate signer for {} via {}",
            public.fingerprint(),
            secret.provider()
        );

        Ok(SurrogateKey {
            secret,
            public,
            hash_alg: HashAlgorithm::default(),
            keys,
        })
    }

    /// Overrides the hash algorithm used for signatures.
    pub fn with_hash_alg(mut self, hash_alg: HashAlgorithm) -> Self {
        self.hash_alg = hash_alg;
        self
    }

    /// Handle of the secret key this surrogate signs with.
    pub fn secret_key(&self) -> &KeyHandle {
        &self.secret
    }
}

#[async_trait]
impl SigningCapability for SurrogateKey {
    fn public_key(&self) -> &KeyHandle {
        &self.public
    }

    fn hash_alg(&self) -> HashAlgorithm {
        self.hash_alg
    }

    async fn sign(&self, context: &SignContext) -> Result<Bytes> {
        self.keys.sign(&self.secret, context).await
    }
}

/// Creates one surrogate per handle.
///
/// All constructions run concurrently. The first failure fails the whole
/// batch and no partial result is returned.
pub async fn surrogate_keys(
    keys: &Arc<dyn KeyManager>,
    handles: &[KeyHandle],
) -> Result<Vec<SurrogateKey>> {
    try_join_all(
        handles
            .iter()
            .map(|handle| SurrogateKey::new(Arc::clone(keys), handle.clone())),
    )
    .await
}
