//! The append-only chain: genesis construction, append, and verification.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::model::{compute_block_hash, Block, GENESIS_LABEL, SENTINEL_HASH};

/// Chain integrity failure. `index()` gives the first offending position.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("block {index}: stored hash does not match recomputation")]
    HashMismatch { index: u64 },

    #[error("block {index}: prev_hash does not match predecessor's hash")]
    BrokenLink { index: u64 },

    #[error("genesis block carries a non-sentinel prev_hash")]
    GenesisPrevHash,
}

impl IntegrityError {
    /// Position of the first block that failed verification.
    pub fn index(&self) -> u64 {
        match self {
            Self::HashMismatch { index } | Self::BrokenLink { index } => *index,
            Self::GenesisPrevHash => 0,
        }
    }
}

/// Append-only sequence of hash-linked blocks.
///
/// Construction seals the genesis block, so a live `Ledger` always holds at
/// least one block and `append` always has a predecessor to link against.
/// The sequence is never exposed mutably; blocks only leave as copies.
#[derive(Debug)]
pub struct Ledger {
    blocks: Vec<Block>,
}

impl Ledger {
    /// Create a ledger holding only the sealed genesis block.
    pub fn new() -> Self {
        let mut genesis = Block {
            index: 0,
            timestamp: rfc3339_now(),
            file_name: GENESIS_LABEL.to_string(),
            content_hash: SENTINEL_HASH.to_string(),
            prev_hash: SENTINEL_HASH.to_string(),
            hash: String::new(),
        };
        genesis.hash = compute_block_hash(&genesis);
        Self {
            blocks: vec![genesis],
        }
    }

    /// The most recently appended block.
    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("ledger always holds genesis")
    }

    /// Index of the tip, i.e. the number of non-genesis blocks.
    pub fn height(&self) -> u64 {
        self.tip().index
    }

    /// Append a block recording an artifact.
    ///
    /// `content_hash` is the already-computed SHA-256 of the artifact bytes;
    /// callers must not reach this point if reading or hashing the artifact
    /// failed. Returns a copy of the sealed block.
    ///
    /// Callers sharing a ledger across threads must hold a write lock for
    /// the whole call: reading the tip and pushing the successor is one
    /// critical section.
    pub fn append(&mut self, file_name: &str, content_hash: &str) -> Block {
        let prev = self.tip();
        let mut block = Block {
            index: prev.index + 1,
            timestamp: rfc3339_now(),
            file_name: file_name.to_string(),
            content_hash: content_hash.to_string(),
            prev_hash: prev.hash.clone(),
            hash: String::new(),
        };
        block.hash = compute_block_hash(&block);
        self.blocks.push(block.clone());
        block
    }

    /// Point-in-time copy of the chain, oldest first.
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    /// Block at the given chain position, if present.
    pub fn get(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Walk the whole chain and verify it.
    ///
    /// Every block's hash must recompute from its own five fields, genesis
    /// must carry the sentinel prev_hash, and every later block's prev_hash
    /// must equal its predecessor's hash. Stops at the first offending
    /// block; corruption is reported, never repaired.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        for (i, b) in self.blocks.iter().enumerate() {
            let index = i as u64;
            if compute_block_hash(b) != b.hash {
                return Err(IntegrityError::HashMismatch { index });
            }
            if i == 0 {
                if b.prev_hash != SENTINEL_HASH {
                    return Err(IntegrityError::GenesisPrevHash);
                }
            } else if b.prev_hash != self.blocks[i - 1].hash {
                return Err(IntegrityError::BrokenLink { index });
            }
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time as an RFC 3339 string. The formatted string, not the
/// instant, is what the block hash covers.
fn rfc3339_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("UTC time formats as RFC 3339")
}
