use bytes::Bytes;
use chrono::{DateTime, SubsecRound, Utc};
use derive_builder::Builder;

/// Data to be encrypted or signed.
///
/// Only [`Plaintext::Text`] is eligible for clear-signing.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub enum Plaintext {
    #[debug("Binary({} bytes)", _0.len())]
    Binary(Bytes),
    #[debug("Text({} bytes)", _0.len())]
    Text(String),
}

impl Plaintext {
    pub fn is_text(&self) -> bool {
        matches!(self, Plaintext::Text(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Plaintext::Binary(b) => b,
            Plaintext::Text(s) => s.as_bytes(),
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

impl From<String> for Plaintext {
    fn from(value: String) -> Self {
        Plaintext::Text(value)
    }
}

impl From<&str> for Plaintext {
    fn from(value: &str) -> Self {
        Plaintext::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Plaintext {
    fn from(value: Vec<u8>) -> Self {
        Plaintext::Binary(value.into())
    }
}

impl From<&[u8]> for Plaintext {
    fn from(value: &[u8]) -> Self {
        Plaintext::Binary(Bytes::copy_from_slice(value))
    }
}

impl From<Bytes> for Plaintext {
    fn from(value: Bytes) -> Self {
        Plaintext::Binary(value)
    }
}

/// Metadata attached to the literal data of a composed message.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(error = "crate::errors::Error"))]
pub struct EncryptOptions {
    /// Creation time recorded in the literal data header.
    #[builder(default = "chrono::Utc::now().trunc_subsecs(0)")]
    created_at: DateTime<Utc>,
    /// File name recorded in the literal data header.
    #[builder(default, setter(into))]
    file_name: String,
    /// Character set of textual plaintext, e.g. `utf-8`.
    #[builder(default, setter(into, strip_option))]
    charset: Option<String>,
}

impl Default for EncryptOptions {
    fn default() -> Self {
        EncryptOptions {
            created_at: Utc::now().trunc_subsecs(0),
            file_name: String::new(),
            charset: None,
        }
    }
}

impl EncryptOptions {
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }
}
