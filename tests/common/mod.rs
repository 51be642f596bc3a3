//! Deterministic collaborators for the integration tests.
//!
//! Keys use a toy wire format: every key is a frame `[len][body]` where
//! `len` is one byte and the body is `kind id binding user_id..`:
//!
//! - `kind` is `P` (public) or `S` (secret), anything else is malformed
//! - `id` is expanded into a 20 byte fingerprint
//! - `binding` is `+` for good and `-` for broken binding signatures
//!
//! Several keys are simply concatenated frames.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use pgp_compose::cleartext::signed_text;
use pgp_compose::errors::{Error, Result};
use pgp_compose::types::{
    Fingerprint, KeyBlock, KeyDescription, KeyHandle, KeyKind, Password, PublicKeyBlock,
};
use pgp_compose::{
    ClearSignedMessage, Context, EncryptedMessage, KeyManager, KeyParser, KeyQuery, LiteralData,
    MessageBuilder, SignContext, SignatureType, SignedBinaryMessage, SigningCapability,
};

pub const PROVIDER: &str = "memory";

pub fn fingerprint(id: u8) -> Fingerprint {
    Fingerprint::new(&[id; 20])
}

/// Serializes a single fake key frame.
pub fn key_frame(kind: u8, id: u8, good_binding: bool, user_id: &str) -> Vec<u8> {
    let mut body = vec![kind, id, if good_binding { b'+' } else { b'-' }];
    body.extend_from_slice(user_id.as_bytes());

    let mut frame = vec![body.len() as u8];
    frame.extend(body);
    frame
}

pub fn public_handle(id: u8, user_id: &str) -> KeyHandle {
    KeyHandle::public(key_frame(b'P', id, true, user_id), PROVIDER, fingerprint(id))
}

pub fn secret_handle(id: u8, user_id: &str) -> KeyHandle {
    KeyHandle::secret(key_frame(b'S', id, true, user_id), PROVIDER, fingerprint(id))
}

fn parse_frame(frame: &[u8]) -> Result<KeyBlock> {
    let kind = match frame.first() {
        Some(b'P') => KeyKind::Public,
        Some(b'S') => KeyKind::Secret,
        _ => {
            return Err(Error::Parse {
                message: "unknown key packet".to_string(),
            })
        }
    };
    let (Some(id), Some(_)) = (frame.get(1), frame.get(2)) else {
        return Err(Error::Parse {
            message: "truncated key".to_string(),
        });
    };
    let user_id = std::str::from_utf8(&frame[3..])?.to_string();

    Ok(KeyBlock::new(
        kind,
        fingerprint(*id),
        vec![user_id],
        frame.to_vec(),
    ))
}

/// A call made into the [`RecordingParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserCall {
    Parse,
    Verify(Fingerprint),
    Describe(Fingerprint),
}

/// Parses the fake key format and records every call.
#[derive(Debug, Default)]
pub struct RecordingParser {
    calls: Mutex<Vec<ParserCall>>,
}

impl RecordingParser {
    pub fn calls(&self) -> Vec<ParserCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Fingerprints whose bindings were verified, in call order.
    pub fn verified(&self) -> Vec<Fingerprint> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ParserCall::Verify(fp) => Some(fp),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ParserCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl KeyParser for RecordingParser {
    fn parse_key(&self, bytes: &[u8]) -> Result<KeyBlock> {
        self.record(ParserCall::Parse);
        match bytes.split_first() {
            Some((len, body)) if *len as usize == body.len() => parse_frame(body),
            _ => Err(Error::Parse {
                message: "not a single key frame".to_string(),
            }),
        }
    }

    fn parse_keys(&self, mut bytes: &[u8]) -> Result<Vec<Result<KeyBlock>>> {
        self.record(ParserCall::Parse);
        let mut keys = Vec::new();
        while let Some((len, rest)) = bytes.split_first() {
            let len = *len as usize;
            if rest.len() < len {
                keys.push(Err(Error::Parse {
                    message: "truncated frame".to_string(),
                }));
                break;
            }
            keys.push(parse_frame(&rest[..len]));
            bytes = &rest[len..];
        }
        Ok(keys)
    }

    fn verify_bindings(&self, key: &KeyBlock) -> Result<()> {
        self.record(ParserCall::Verify(key.fingerprint().clone()));
        if key.packets()[2] != b'+' {
            return Err(Error::Message {
                message: format!("invalid binding signature on {}", key.fingerprint()),
            });
        }
        Ok(())
    }

    fn describe(&self, key: &KeyBlock) -> Result<KeyDescription> {
        self.record(ParserCall::Describe(key.fingerprint().clone()));
        Ok(KeyDescription {
            fingerprint: key.fingerprint().clone(),
            kind: key.kind(),
            user_ids: key.user_ids().to_vec(),
            algorithm: "EdDSA".to_string(),
            created_at: None,
            subkeys: 0,
        })
    }
}

/// Keyring held in memory. Signatures are `SIG:` followed by the digest.
#[derive(Debug, Default)]
pub struct MemoryKeyManager {
    keys: Mutex<BTreeMap<Fingerprint, (KeyHandle, Option<KeyHandle>)>>,
    /// Fingerprints for which `public_key` fails.
    locked: Mutex<Vec<Fingerprint>>,
    public_key_calls: Mutex<usize>,
    signed: Mutex<Vec<(Fingerprint, SignContext)>>,
}

impl MemoryKeyManager {
    pub fn with_keys(ids: &[(u8, &str)]) -> Self {
        let mgr = Self::default();
        for (id, user_id) in ids {
            mgr.insert(*id, user_id);
        }
        mgr
    }

    pub fn insert(&self, id: u8, user_id: &str) {
        self.keys.lock().unwrap().insert(
            fingerprint(id),
            (public_handle(id, user_id), Some(secret_handle(id, user_id))),
        );
    }

    pub fn lock_key(&self, id: u8) {
        self.locked.lock().unwrap().push(fingerprint(id));
    }

    pub fn public_key_calls(&self) -> usize {
        *self.public_key_calls.lock().unwrap()
    }

    pub fn signed(&self) -> Vec<(Fingerprint, SignContext)> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyManager for MemoryKeyManager {
    async fn lookup(&self, query: &KeyQuery) -> Result<Vec<KeyHandle>> {
        let keys = self.keys.lock().unwrap();
        let found = keys
            .values()
            .map(|(public, _)| public)
            .filter(|public| match query {
                KeyQuery::Fingerprint(fp) => public.fingerprint() == fp,
                KeyQuery::Email(email) => public
                    .serialized()
                    .windows(email.len())
                    .any(|w| w == email.as_bytes()),
                KeyQuery::Provider(provider) => public.provider() == provider,
            })
            .cloned()
            .collect();
        Ok(found)
    }

    async fn list_keys(&self, secret: bool) -> Result<Vec<KeyHandle>> {
        let keys = self.keys.lock().unwrap();
        let handles = keys
            .values()
            .filter_map(|(public, sec)| if secret { sec.clone() } else { Some(public.clone()) })
            .collect();
        Ok(handles)
    }

    async fn public_key(&self, key: &KeyHandle) -> Result<KeyHandle> {
        *self.public_key_calls.lock().unwrap() += 1;
        if self.locked.lock().unwrap().contains(key.fingerprint()) {
            return Err(Error::collaborator(format!(
                "key {} is locked",
                key.fingerprint()
            )));
        }

        let keys = self.keys.lock().unwrap();
        match keys.get(key.fingerprint()) {
            Some((public, Some(_))) => Ok(public.clone()),
            _ => Err(Error::collaborator(format!(
                "no secret key {}",
                key.fingerprint()
            ))),
        }
    }

    async fn sign(&self, key: &KeyHandle, context: &SignContext) -> Result<Bytes> {
        self.signed
            .lock()
            .unwrap()
            .push((key.fingerprint().clone(), context.clone()));

        let mut sig = BytesMut::from(&b"SIG:"[..]);
        sig.put_slice(&context.digest);
        Ok(sig.freeze())
    }

    async fn import_keys(&self, keys: &[KeyBlock]) -> Result<Vec<Fingerprint>> {
        let mut imported = Vec::new();
        for key in keys {
            let id = key.fingerprint().as_bytes()[0];
            self.insert(id, &key.user_ids()[0]);
            imported.push(key.fingerprint().clone());
        }
        Ok(imported)
    }
}

/// Builder producing readable frames instead of real packets:
///
/// - encrypted: `ENC[<recipient fingerprints>;<password count>;<signature>]<data>`
/// - signed: `OPS[<signature>]<data>`
/// - clear-signed literal form: `CSF[<signature>]<text>`
#[derive(Debug, Default)]
pub struct FramingBuilder;

async fn signature(
    signer: &dyn SigningCapability,
    signature_type: SignatureType,
    data: &[u8],
) -> Result<Bytes> {
    signer
        .sign(&SignContext {
            hash_alg: signer.hash_alg(),
            signature_type,
            digest: Bytes::copy_from_slice(data),
        })
        .await
}

#[async_trait]
impl MessageBuilder for FramingBuilder {
    async fn encrypt(
        &self,
        literal: LiteralData,
        recipients: &[PublicKeyBlock],
        passwords: &[Password],
        signer: Option<&dyn SigningCapability>,
    ) -> Result<EncryptedMessage> {
        let sig = match signer {
            Some(signer) => signature(signer, SignatureType::Binary, literal.data()).await?,
            None => Bytes::new(),
        };
        let fps: Vec<String> = recipients.iter().map(|r| r.fingerprint().to_string()).collect();

        let mut out = format!("ENC[{};{};", fps.join(","), passwords.len()).into_bytes();
        out.extend_from_slice(&sig);
        out.push(b']');
        out.extend_from_slice(literal.data());
        Ok(EncryptedMessage::new(out))
    }

    async fn clear_sign(
        &self,
        text: &str,
        signer: &dyn SigningCapability,
    ) -> Result<ClearSignedMessage> {
        let signed = signed_text(text);
        let sig = signature(signer, SignatureType::Text, signed.as_bytes()).await?;

        let mut literal = b"CSF[".to_vec();
        literal.extend_from_slice(&sig);
        literal.push(b']');
        literal.extend_from_slice(signed.as_bytes());
        Ok(ClearSignedMessage::new(
            text,
            vec![signer.hash_alg()],
            sig,
            literal,
        ))
    }

    async fn sign(
        &self,
        literal: LiteralData,
        signer: &dyn SigningCapability,
    ) -> Result<SignedBinaryMessage> {
        let sig = signature(signer, SignatureType::Binary, literal.data()).await?;

        let mut out = b"OPS[".to_vec();
        out.extend_from_slice(&sig);
        out.push(b']');
        out.extend_from_slice(literal.data());
        Ok(SignedBinaryMessage::new(out))
    }
}

/// A context wired to fresh fakes, with handles to inspect them.
pub struct Harness {
    pub ctx: Context,
    pub keys: Arc<MemoryKeyManager>,
    pub parser: Arc<RecordingParser>,
}

impl Harness {
    pub fn new(keys: MemoryKeyManager) -> Self {
        let _ = pretty_env_logger::try_init();

        let keys = Arc::new(keys);
        let parser = Arc::new(RecordingParser::default());
        let ctx = Context::new(keys.clone(), parser.clone(), Arc::new(FramingBuilder));
        Harness { ctx, keys, parser }
    }
}
