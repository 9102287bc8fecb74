//! SHA-256 helpers shared by block sealing and artifact digesting.

use sha2::{Digest, Sha256};

/// Hash inputs (concatenate as bytes, SHA-256) and return lowercase hex.
pub fn hash_concat(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for p in parts {
        hasher.update(p);
    }
    hex::encode(hasher.finalize())
}

/// SHA-256 of a single byte slice, lowercase hex. Used for artifact content.
pub fn hash_bytes(bytes: &[u8]) -> String {
    hash_concat(&[bytes])
}
