mod fingerprint;
mod hash;
mod key_block;
mod key_handle;
mod password;
mod plaintext;

pub use fingerprint::*;
pub use hash::*;
pub use key_block::*;
pub use key_handle::*;
pub use password::*;
pub use plaintext::*;
