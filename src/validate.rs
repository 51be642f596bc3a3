//! Recipient key validation.

use log::debug;

use crate::errors::Result;
use crate::parser::KeyParser;
use crate::types::{KeyHandle, PublicKeyBlock};

/// Turns a public key handle into a verified public key block.
///
/// Parses the serialized key, rejects anything that is not a public key with
/// [`Error::InvalidArguments`](crate::errors::Error::InvalidArguments) and
/// runs the binding signature checks. Parser and verification failures are
/// returned unchanged.
///
/// # Panics
///
/// Panics if `handle` is marked secret. Recipients are always public keys,
/// handing in a secret handle is a bug in the caller.
pub fn validate_public_key(parser: &dyn KeyParser, handle: &KeyHandle) -> Result<PublicKeyBlock> {
    assert!(
        !handle.is_secret(),
        "recipient handle {} must be a public key",
        handle.fingerprint()
    );

    let key = parser.parse_key(handle.serialized())?;
    if !key.is_public() {
        invalid_args_err!("Invalid public key");
    }

    parser.verify_bindings(&key)?;
    debug!("validated recipient {}", key.fingerprint());

    Ok(PublicKeyBlock::new_verified(key))
}

/// Validates every recipient, keeping their order. Stops at the first failure.
pub fn validate_public_keys(
    parser: &dyn KeyParser,
    handles: &[KeyHandle],
) -> Result<Vec<PublicKeyBlock>> {
    handles
        .iter()
        .map(|handle| validate_public_key(parser, handle))
        .collect()
}
