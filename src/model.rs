//! Block data model and the block-hash wire contract.

use serde::{Deserialize, Serialize};

use crate::crypto::hash_concat;

/// Sentinel stored where no real digest exists: the genesis block's
/// `prev_hash` (no predecessor) and `content_hash` (no artifact).
pub const SENTINEL_HASH: &str = "0";

/// Label recorded as the genesis block's file name.
pub const GENESIS_LABEL: &str = "Genesis Block";

/// One ledger entry, immutable once sealed.
///
/// The serialized field names are a contract for any client parsing the
/// chain; do not rename them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain, contiguous from 0 (genesis).
    pub index: u64,
    /// RFC 3339 UTC creation time. Feeds the block hash, so the format is
    /// part of the wire contract.
    pub timestamp: String,
    /// Client-supplied artifact name (sentinel label for genesis).
    pub file_name: String,
    /// SHA-256 hex of the artifact bytes (`"0"` for genesis).
    pub content_hash: String,
    /// `hash` of the predecessor (`"0"` for genesis).
    pub prev_hash: String,
    /// SHA-256 hex over this block's other five fields.
    pub hash: String,
}

/// Compute a block's hash over `(index, timestamp, file_name, content_hash,
/// prev_hash)` concatenated in that exact order, index as a decimal string.
///
/// Any change to the field order, the timestamp format, or the encoding
/// invalidates every previously sealed block; treat this as a versioned wire
/// contract, not an implementation detail.
pub fn compute_block_hash(b: &Block) -> String {
    let index = b.index.to_string();
    hash_concat(&[
        index.as_bytes(),
        b.timestamp.as_bytes(),
        b.file_name.as_bytes(),
        b.content_hash.as_bytes(),
        b.prev_hash.as_bytes(),
    ])
}
