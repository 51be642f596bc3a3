//! Composition dispatch: decides which kind of message a request turns into.

use log::debug;

use crate::builder::MessageBuilder;
use crate::errors::Result;
use crate::message::{ComposedMessage, LiteralData};
use crate::parser::KeyParser;
use crate::signer::SigningCapability;
use crate::types::{EncryptOptions, KeyHandle, Password, Plaintext};
use crate::validate::validate_public_keys;

/// Number of signers a single composition supports.
pub const MAX_SIGNERS: usize = 1;

/// Fails with [`Error::Unsupported`](crate::errors::Error::Unsupported) for
/// more than [`MAX_SIGNERS`] signers.
pub fn check_signer_count(signers: usize) -> Result<()> {
    if signers > MAX_SIGNERS {
        unsupported_err!(
            "{} signing keys provided, only a single signer is supported",
            signers
        );
    }
    Ok(())
}

/// Everything a single composition needs.
#[derive(Debug)]
pub struct Composition<'a> {
    pub plaintext: &'a Plaintext,
    pub options: &'a EncryptOptions,
    /// Recipient public keys, in the order they should appear.
    pub recipients: &'a [KeyHandle],
    pub passwords: &'a [Password],
    pub signers: &'a [&'a dyn SigningCapability],
}

impl Composition<'_> {
    /// A message is encrypted as soon as there is anyone to encrypt to.
    pub fn needs_encryption(&self) -> bool {
        !self.recipients.is_empty() || !self.passwords.is_empty()
    }
}

/// Picks the message construction for a composition and runs it.
pub struct Composer<'a> {
    parser: &'a dyn KeyParser,
    builder: &'a dyn MessageBuilder,
}

impl<'a> Composer<'a> {
    pub fn new(parser: &'a dyn KeyParser, builder: &'a dyn MessageBuilder) -> Self {
        Composer { parser, builder }
    }

    /// Composes the message.
    ///
    /// - more than one signer: `Unsupported`, before any recipient is looked at
    /// - recipients or passwords: an encrypted message, signed inside if a
    ///   signer is present
    /// - otherwise, without a signer: `InvalidArguments`
    /// - otherwise, text: a clear-signed message
    /// - otherwise, binary: a one-pass signed message
    pub async fn compose(&self, req: Composition<'_>) -> Result<ComposedMessage> {
        check_signer_count(req.signers.len())?;
        let signer = req.signers.first().copied();

        if req.needs_encryption() {
            let recipients = validate_public_keys(self.parser, req.recipients)?;
            let literal = LiteralData::from_plaintext(req.plaintext, req.options);
            debug!(
                "encrypting to {} keys and {} passwords (signed: {})",
                recipients.len(),
                req.passwords.len(),
                signer.is_some()
            );

            let msg = self
                .builder
                .encrypt(literal, &recipients, req.passwords, signer)
                .await?;
            return Ok(ComposedMessage::Encrypted(msg));
        }

        let Some(signer) = signer else {
            invalid_args_err!("No signing keys provided");
        };

        match req.plaintext {
            Plaintext::Text(text) => {
                debug!("clear-signing with {}", signer.fingerprint());
                let msg = self.builder.clear_sign(text, signer).await?;
                Ok(ComposedMessage::ClearSigned(msg))
            }
            Plaintext::Binary(_) => {
                debug!("signing binary data with {}", signer.fingerprint());
                let literal = LiteralData::from_plaintext(req.plaintext, req.options);
                let msg = self.builder.sign(literal, signer).await?;
                Ok(ComposedMessage::SignedBinary(msg))
            }
        }
    }
}
