//! Deterministic identifier for cache keys and flattened module filenames.
//!
//! Salted double SHA-256, hex encoded. Inputs are build-controlled strings
//! (absolute locators, cache keys), so adversarial collisions are not a concern.

use sha2::{Digest, Sha256};

const SALT: &[u8] = crate::NAME.as_bytes();

/// Returns `hex(sha256(SALT || sha256(SALT || buf)))`, 64 lowercase hex chars.
pub fn digest(buf: &[u8]) -> String {
    let inner = Sha256::new().chain_update(SALT).chain_update(buf).finalize();
    let outer = Sha256::new()
        .chain_update(SALT)
        .chain_update(inner)
        .finalize();
    hex::encode(outer)
}

/// Digest of a UTF-8 string, e.g. a canonical locator.
pub fn digest_str(s: &str) -> String {
    digest(s.as_bytes())
}
