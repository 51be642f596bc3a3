//! # pgp-compose
//!
//! The composition layer of an OpenPGP client. Given plaintext, recipient
//! keys, passwords and a signer it decides which message to build
//! (encrypted, signed, encrypted and signed, or clear-signed), drives the
//! builder that produces it and encodes the result, armored or binary.
//!
//! Packet serialization, key storage and the cryptographic primitives are
//! supplied by the caller through the [`KeyParser`], [`MessageBuilder`] and
//! [`KeyManager`] traits.
//!
//! ```ignore
//! let mut ctx = Context::new(keys, parser, builder);
//! ctx.set_header("Comment", "pgp-compose").await?;
//!
//! let out = ctx
//!     .encrypt_sign(ComposeRequest::new("hello").recipient(bob))
//!     .await?;
//! assert!(out.is_armored());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

#[macro_use]
pub mod errors;

pub mod armor;
pub mod builder;
pub mod cleartext;
pub mod compose;
pub mod context;
pub mod describe;
pub mod encoder;
pub mod key_manager;
pub mod message;
pub mod normalize_lines;
pub mod parser;
pub mod ser;
pub mod signer;
pub mod types;
pub mod validate;

pub use self::builder::MessageBuilder;
pub use self::cleartext::ClearSignedMessage;
pub use self::context::{ComposeRequest, Context};
pub use self::describe::KeyData;
pub use self::encoder::{ArmorSettings, Encoded};
pub use self::errors::{Error, Result};
pub use self::key_manager::{KeyManager, KeyQuery};
pub use self::message::{ComposedMessage, EncryptedMessage, LiteralData, SignedBinaryMessage};
pub use self::parser::KeyParser;
pub use self::signer::{SignContext, SignatureType, SigningCapability, SurrogateKey};
