//! Composed message values.
//!
//! The builders produce the packet bytes; the types here only carry them
//! to the output encoder.

use std::{fmt, io};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::cleartext::ClearSignedMessage;
use crate::errors::Result;
use crate::normalize_lines::{normalize, LineBreak};
use crate::ser::Serialize;
use crate::types::{EncryptOptions, Plaintext};

/// Format of the literal data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Binary,
    /// UTF-8 text with "\r\n" line endings.
    Utf8,
}

/// Literal data payload: the plaintext together with its metadata.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct LiteralData {
    mode: DataMode,
    file_name: String,
    created_at: DateTime<Utc>,
    charset: Option<String>,
    #[debug("{} bytes", data.len())]
    data: Bytes,
}

impl LiteralData {
    /// Wraps `plaintext` with the metadata from `options`.
    ///
    /// Text is stored in canonical form, with "\r\n" line endings.
    pub fn from_plaintext(plaintext: &Plaintext, options: &EncryptOptions) -> Self {
        let (mode, data) = match plaintext {
            Plaintext::Binary(data) => (DataMode::Binary, data.clone()),
            Plaintext::Text(text) => (
                DataMode::Utf8,
                Bytes::from(normalize(text, LineBreak::Crlf)),
            ),
        };

        LiteralData {
            mode,
            file_name: options.file_name().to_string(),
            created_at: *options.created_at(),
            charset: options.charset().map(str::to_string),
            data,
        }
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn is_binary(&self) -> bool {
        self.mode == DataMode::Binary
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

macro_rules! packet_message {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name {
            packets: Bytes,
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("packets", &format_args!("{} bytes", self.packets.len()))
                    .finish()
            }
        }

        impl $name {
            pub fn new(packets: impl Into<Bytes>) -> Self {
                Self {
                    packets: packets.into(),
                }
            }

            pub fn packets(&self) -> &Bytes {
                &self.packets
            }
        }

        impl Serialize for $name {
            fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
                writer.write_all(&self.packets)?;
                Ok(())
            }

            fn write_len(&self) -> usize {
                self.packets.len()
            }
        }
    };
}

packet_message!(
    /// Public key and/or password encrypted message, optionally signed inside.
    EncryptedMessage
);

packet_message!(
    /// Literal data with a one-pass signature attached.
    SignedBinaryMessage
);

/// The result of a composition. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposedMessage {
    Encrypted(EncryptedMessage),
    SignedBinary(SignedBinaryMessage),
    ClearSigned(ClearSignedMessage),
}

impl ComposedMessage {
    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ComposedMessage::Encrypted(_) => "encrypted",
            ComposedMessage::SignedBinary(_) => "signed",
            ComposedMessage::ClearSigned(_) => "clear-signed",
        }
    }
}
