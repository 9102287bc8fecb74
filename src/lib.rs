//! Append-only hash-linked ledger recording file-upload provenance.
//!
//! Each uploaded artifact is SHA-256 hashed and appended as a block linking
//! to its predecessor's hash; the chain can be queried and verified over a
//! small HTTP surface.

pub mod config;
pub mod crypto;
pub mod ledger;
pub mod model;
pub mod routes;
pub mod storage;
