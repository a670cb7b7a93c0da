//! SHA3-256 adapter.
//!
//! The engine only ever sees `digest(bytes) -> [u8; 32]`; the sponge
//! behind it stays inside this module.

use sha3::{Digest, Sha3_256};

/// Output size of the hash primitive, and size of the derived engine state.
pub const DIGEST_SIZE: usize = 32;

/// SHA3-256 of `msg`.
pub fn digest(msg: &[u8]) -> [u8; DIGEST_SIZE] {
    digest_parts(&[msg])
}

/// SHA3-256 of the concatenation of `parts`, without building the
/// concatenation.
pub(crate) fn digest_parts(parts: &[&[u8]]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
