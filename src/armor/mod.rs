//! # Armor module
//!
//! ASCII Armor as specified in RFC 9580: the writer used by the output
//! encoder and the multi-block reader behind the armor text extractor.

mod reader;
mod writer;

use std::collections::BTreeMap;
use std::fmt;
use std::io;

pub use self::reader::*;
pub use self::writer::*;
use crate::errors::Result;
use crate::ser::Serialize;

/// Armor block types.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BlockType {
    /// PGP public key
    PublicKey,
    /// PGP private key
    PrivateKey,
    Message,
    MultiPartMessage(usize, usize),
    Signature,
    // gnupgp extension
    File,
    /// Cleartext Framework message
    CleartextMessage,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::PublicKey => f.write_str("PGP PUBLIC KEY BLOCK"),
            BlockType::PrivateKey => f.write_str("PGP PRIVATE KEY BLOCK"),
            BlockType::MultiPartMessage(x, y) => write!(f, "PGP MESSAGE, PART {x}/{y}"),
            BlockType::Message => f.write_str("PGP MESSAGE"),
            BlockType::Signature => f.write_str("PGP SIGNATURE"),
            BlockType::File => f.write_str("PGP ARMORED FILE"),
            BlockType::CleartextMessage => f.write_str("PGP SIGNED MESSAGE"),
        }
    }
}

impl Serialize for BlockType {
    fn to_writer<W: io::Write>(&self, w: &mut W) -> Result<()> {
        write!(w, "{self}")?;

        Ok(())
    }

    fn write_len(&self) -> usize {
        // allocates, but this is tiny, should be fine
        self.to_string().len()
    }
}

/// Armor Headers, as found while reading. A name may repeat.
pub type Headers = BTreeMap<String, Vec<String>>;

/// Options for writing armored output.
#[derive(Debug, Clone, Copy)]
pub struct ArmorOptions<'a> {
    /// Armor headers
    pub headers: Option<&'a BTreeMap<String, String>>,
    /// Should a checksum be included? Default to `true`.
    pub include_checksum: bool,
}

impl Default for ArmorOptions<'_> {
    fn default() -> Self {
        Self {
            headers: None,
            include_checksum: true,
        }
    }
}

impl<'a> From<Option<&'a BTreeMap<String, String>>> for ArmorOptions<'a> {
    fn from(headers: Option<&'a BTreeMap<String, String>>) -> Self {
        Self {
            headers,
            include_checksum: true,
        }
    }
}
