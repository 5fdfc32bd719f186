//! Exact-duplicate detection for submitted feedback

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Content fingerprint of a feedback text (hex SHA-256 over its UTF-8 bytes)
pub fn feedback_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Session-scoped set of fingerprints already analyzed.
///
/// Only byte-identical text collides; no normalization is applied.
#[derive(Debug, Clone, Default)]
pub struct DedupGuard {
    seen: HashSet<String>,
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a fingerprint was already recorded
    pub fn is_duplicate(&self, hash: &str) -> bool {
        self.seen.contains(hash)
    }

    /// Record a fingerprint. Returns false if it was already present.
    pub fn record(&mut self, hash: String) -> bool {
        self.seen.insert(hash)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
