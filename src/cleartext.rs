//! Implements Cleartext Signature Framework

use std::io::Write;

use bytes::Bytes;

use crate::armor::{self, ArmorOptions};
use crate::errors::Result;
use crate::normalize_lines::{normalize, LineBreak};
use crate::types::HashAlgorithm;

const HEADER_LINE: &str = "-----BEGIN PGP SIGNED MESSAGE-----";

/// Implementation of a Cleartext Signed Message.
///
/// Ref <https://www.rfc-editor.org/rfc/rfc9580.html#name-cleartext-signature-framewo>
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct ClearSignedMessage {
    /// Normalized and dash-escaped representation of the signed text.
    /// This is exactly the format that gets serialized in cleartext format.
    csf_encoded_text: String,

    /// Hash algorithms that are used in the signature(s) in this message
    hashes: Vec<HashAlgorithm>,

    /// Serialized signature packet(s).
    #[debug("{} bytes", signatures.len())]
    signatures: Bytes,

    /// The same text and signatures as a binary literal message.
    #[debug("{} bytes", literal_message.len())]
    literal_message: Bytes,
}

impl ClearSignedMessage {
    /// Assembles a clear-signed message from the pieces a builder produced.
    ///
    /// `signatures` must have been computed over [`signed_text`] of `text`.
    pub fn new(
        text: &str,
        hashes: Vec<HashAlgorithm>,
        signatures: impl Into<Bytes>,
        literal_message: impl Into<Bytes>,
    ) -> Self {
        Self {
            csf_encoded_text: dash_escape(text),
            hashes,
            signatures: signatures.into(),
            literal_message: literal_message.into(),
        }
    }

    /// The "cleartext framework"-encoded (i.e. dash-escaped) form of the message.
    pub fn text(&self) -> &str {
        &self.csf_encoded_text
    }

    pub fn hashes(&self) -> &[HashAlgorithm] {
        &self.hashes
    }

    pub fn signatures(&self) -> &Bytes {
        &self.signatures
    }

    /// The binary literal message carrying the same text and signatures.
    pub fn literal_message(&self) -> &Bytes {
        &self.literal_message
    }

    /// Normalizes the text to the format that was hashed for the signature.
    pub fn signed_text(&self) -> String {
        signed_text(&dash_unescape(&self.csf_encoded_text))
    }

    pub fn to_armored_writer(&self, writer: &mut impl Write, opts: ArmorOptions<'_>) -> Result<()> {
        // Header
        writer.write_all(HEADER_LINE.as_bytes())?;
        writer.write_all(&[b'\n'])?;

        // Hashes
        for hash in &self.hashes {
            writer.write_all(b"Hash: ")?;
            writer.write_all(hash.to_string().as_bytes())?;
            writer.write_all(&[b'\n'])?;
        }
        writer.write_all(&[b'\n'])?;

        // Cleartext body
        writer.write_all(self.csf_encoded_text.as_bytes())?;
        // not part of the signed text
        writer.write_all(&[b'\n'])?;

        armor::write(
            &self.signatures,
            armor::BlockType::Signature,
            writer,
            opts,
        )?;

        Ok(())
    }

    pub fn to_armored_string(&self, opts: ArmorOptions<'_>) -> Result<String> {
        let mut buf = Vec::new();
        self.to_armored_writer(&mut buf, opts)?;
        let res = String::from_utf8(buf).map_err(|e| e.utf8_error())?;
        Ok(res)
    }
}

/// The text a text-mode signature is computed over: trailing whitespace
/// stripped from every line, line endings normalized to "\r\n".
pub fn signed_text(text: &str) -> String {
    let normalized = normalize(text, LineBreak::Lf);
    let stripped: Vec<&str> = normalized
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect();
    stripped.join("\r\n")
}

/// Dash escape the given text.
///
/// This implementation is implicitly agnostic between "\n" and "\r\n" line endings.
fn dash_escape(text: &str) -> String {
    let mut out = String::new();
    for line in text.split_inclusive('\n') {
        if line.starts_with('-') {
            out += "- ";
        }
        out.push_str(line);
    }

    out
}

/// Undo dash escaping of `text`.
fn dash_unescape(text: &str) -> String {
    let mut out = String::new();
    for line in text.split_inclusive('\n') {
        // drop dash escapes if they exist
        if let Some(stripped) = line.strip_prefix("- ") {
            out += stripped;
        } else {
            out += line;
        }
    }

    out
}
