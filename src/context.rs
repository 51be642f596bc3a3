//! The composition context: public surface of this crate.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::builder::MessageBuilder;
use crate::compose::{check_signer_count, Composer, Composition};
use crate::describe::{self, KeyData};
use crate::encoder::{self, ArmorSettings, Encoded};
use crate::errors::Result;
use crate::key_manager::{KeyManager, KeyQuery};
use crate::parser::KeyParser;
use crate::signer::{surrogate_keys, SigningCapability};
use crate::types::{EncryptOptions, Fingerprint, KeyDescription, KeyHandle, Password, Plaintext};

/// Input of [`Context::encrypt_sign`].
#[derive(Debug)]
pub struct ComposeRequest {
    pub plaintext: Plaintext,
    pub options: EncryptOptions,
    pub recipients: Vec<KeyHandle>,
    pub passwords: Vec<Password>,
    /// Secret key handles to sign with.
    pub signers: Vec<KeyHandle>,
}

impl ComposeRequest {
    pub fn new(plaintext: impl Into<Plaintext>) -> Self {
        ComposeRequest {
            plaintext: plaintext.into(),
            options: EncryptOptions::default(),
            recipients: Vec::new(),
            passwords: Vec::new(),
            signers: Vec::new(),
        }
    }

    pub fn options(mut self, options: EncryptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn recipient(mut self, key: KeyHandle) -> Self {
        self.recipients.push(key);
        self
    }

    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.passwords.push(password.into());
        self
    }

    pub fn signer(mut self, key: KeyHandle) -> Self {
        self.signers.push(key);
        self
    }
}

/// Composes, encodes and describes OpenPGP data on top of a key manager, a
/// key parser and a message builder.
pub struct Context {
    settings: ArmorSettings,
    keys: Arc<dyn KeyManager>,
    parser: Arc<dyn KeyParser>,
    builder: Arc<dyn MessageBuilder>,
}

impl Context {
    pub fn new(
        keys: Arc<dyn KeyManager>,
        parser: Arc<dyn KeyParser>,
        builder: Arc<dyn MessageBuilder>,
    ) -> Self {
        Self::with_settings(keys, parser, builder, ArmorSettings::default())
    }

    pub fn with_settings(
        keys: Arc<dyn KeyManager>,
        parser: Arc<dyn KeyParser>,
        builder: Arc<dyn MessageBuilder>,
        settings: ArmorSettings,
    ) -> Self {
        Context {
            settings,
            keys,
            parser,
            builder,
        }
    }

    pub fn armor_settings(&self) -> &ArmorSettings {
        &self.settings
    }

    /// Switches between armored text and raw binary output.
    pub async fn set_armor(&mut self, armor: bool) -> Result<()> {
        self.settings.armor = armor;
        Ok(())
    }

    /// Replaces all armor headers.
    pub async fn set_headers(&mut self, headers: BTreeMap<String, String>) -> Result<()> {
        self.settings.headers = headers;
        Ok(())
    }

    /// Sets a single armor header, replacing an earlier value of the same name.
    pub async fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.settings.headers.insert(name.into(), value.into());
        Ok(())
    }

    /// Encrypts and/or signs a plaintext and encodes the result.
    ///
    /// Runs in three stages: surrogate signers are created, the message is
    /// composed, then encoded with the current armor settings. Nothing is
    /// returned unless all three succeed.
    pub async fn encrypt_sign(&self, request: ComposeRequest) -> Result<Encoded> {
        let ComposeRequest {
            plaintext,
            options,
            recipients,
            passwords,
            signers,
        } = request;

        // keep multi-signer requests away from the key manager
        check_signer_count(signers.len())?;
        let surrogates = surrogate_keys(&self.keys, &signers).await?;
        let signers: Vec<&dyn SigningCapability> = surrogates
            .iter()
            .map(|s| s as &dyn SigningCapability)
            .collect();

        let composer = Composer::new(self.parser.as_ref(), self.builder.as_ref());
        let message = composer
            .compose(Composition {
                plaintext: &plaintext,
                options: &options,
                recipients: &recipients,
                passwords: &passwords,
                signers: &signers,
            })
            .await?;

        encoder::encode(&message, &self.settings)
    }

    /// Describes the keys in `data`, skipping blocks that do not parse or verify.
    pub async fn describe_keys(&self, data: impl Into<KeyData>) -> Result<Vec<KeyDescription>> {
        describe::describe_keys(self.parser.as_ref(), data.into())
    }

    /// Hands the valid keys in `data` to the key manager for storage.
    ///
    /// Blocks that do not parse or verify are skipped, as for
    /// [`describe_keys`](Self::describe_keys).
    pub async fn import_keys(&self, data: impl Into<KeyData>) -> Result<Vec<Fingerprint>> {
        let bytes = data.into().into_bytes()?;
        let valid = describe::parse_valid_keys(self.parser.as_ref(), &bytes)?;
        let imported = self.keys.import_keys(&valid).await?;
        debug!("imported {} keys", imported.len());
        Ok(imported)
    }

    pub async fn list_keys(&self, secret: bool) -> Result<Vec<KeyHandle>> {
        self.keys.list_keys(secret).await
    }

    pub async fn lookup_keys(&self, query: &KeyQuery) -> Result<Vec<KeyHandle>> {
        self.keys.lookup(query).await
    }

    /// Decryption and signature verification are not implemented.
    pub async fn decrypt_verify(&self, _data: KeyData, _verifiers: &[KeyHandle]) -> Result<Encoded> {
        unimplemented_err!("decryption and verification")
    }
}
