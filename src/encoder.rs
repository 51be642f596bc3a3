//! Output encoding of composed messages.

use std::collections::BTreeMap;

use bytes::Bytes;
use log::debug;

use crate::armor::{self, ArmorOptions, BlockType};
use crate::errors::Result;
use crate::message::ComposedMessage;
use crate::ser::Serialize;

/// Armor configuration of a composition context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorSettings {
    /// Produce ASCII armored text instead of raw bytes.
    pub armor: bool,
    /// Headers written into every armored block.
    pub headers: BTreeMap<String, String>,
    pub include_checksum: bool,
}

impl Default for ArmorSettings {
    fn default() -> Self {
        ArmorSettings {
            armor: true,
            headers: BTreeMap::new(),
            include_checksum: true,
        }
    }
}

impl ArmorSettings {
    pub fn armor_options(&self) -> ArmorOptions<'_> {
        ArmorOptions {
            headers: Some(&self.headers),
            include_checksum: self.include_checksum,
        }
    }
}

/// Final output of a composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Armored(String),
    Binary(Bytes),
}

impl Encoded {
    pub fn is_armored(&self) -> bool {
        matches!(self, Encoded::Armored(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Armored(text) => text.as_bytes(),
            Encoded::Binary(bytes) => bytes,
        }
    }

    pub fn into_armored(self) -> Option<String> {
        match self {
            Encoded::Armored(text) => Some(text),
            Encoded::Binary(_) => None,
        }
    }

    pub fn into_binary(self) -> Option<Bytes> {
        match self {
            Encoded::Armored(_) => None,
            Encoded::Binary(bytes) => Some(bytes),
        }
    }
}

/// Serializes `message` according to `settings`.
///
/// Clear-signed messages keep their cleartext framing when armored. Without
/// armor they fall back to their binary literal message form, the framing
/// only exists as text.
pub fn encode(message: &ComposedMessage, settings: &ArmorSettings) -> Result<Encoded> {
    debug!(
        "encoding {} message (armor: {})",
        message.kind(),
        settings.armor
    );

    let encoded = match message {
        ComposedMessage::ClearSigned(msg) => {
            if settings.armor {
                Encoded::Armored(msg.to_armored_string(settings.armor_options())?)
            } else {
                Encoded::Binary(msg.literal_message().clone())
            }
        }
        ComposedMessage::Encrypted(msg) => encode_packets(msg, settings)?,
        ComposedMessage::SignedBinary(msg) => encode_packets(msg, settings)?,
    };

    Ok(encoded)
}

fn encode_packets(msg: &impl Serialize, settings: &ArmorSettings) -> Result<Encoded> {
    let bytes = Bytes::from(msg.to_bytes()?);
    if !settings.armor {
        return Ok(Encoded::Binary(bytes));
    }

    let text = armor::to_armored_string(&bytes, BlockType::Message, settings.armor_options())?;
    Ok(Encoded::Armored(text))
}
