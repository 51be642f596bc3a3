//! Message builder collaborator.

use async_trait::async_trait;

use crate::cleartext::ClearSignedMessage;
use crate::errors::Result;
use crate::message::{EncryptedMessage, LiteralData, SignedBinaryMessage};
use crate::signer::SigningCapability;
use crate::types::{Password, PublicKeyBlock};

/// Builds OpenPGP messages.
///
/// Implementations own the packet format and the symmetric primitives. Any
/// signature they need is requested from the given [`SigningCapability`].
#[async_trait]
pub trait MessageBuilder: Send + Sync {
    /// Encrypts `literal` to every key in `recipients` and every password in
    /// `passwords`. With a `signer` the literal data is signed before it is
    /// encrypted.
    async fn encrypt(
        &self,
        literal: LiteralData,
        recipients: &[PublicKeyBlock],
        passwords: &[Password],
        signer: Option<&dyn SigningCapability>,
    ) -> Result<EncryptedMessage>;

    /// Clear-signs `text`.
    async fn clear_sign(
        &self,
        text: &str,
        signer: &dyn SigningCapability,
    ) -> Result<ClearSignedMessage>;

    /// Attaches a one-pass signature to `literal`.
    async fn sign(
        &self,
        literal: LiteralData,
        signer: &dyn SigningCapability,
    ) -> Result<SignedBinaryMessage>;
}
