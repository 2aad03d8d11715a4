//! Result Cache Module
//!
//! Keyed store of recent operation results with lazy, lookup-time expiry.

use std::collections::HashMap;

use crate::error::CacheError;
use crate::queue::{CacheEntry, CacheStats};

// == Result Cache ==
/// Recent results keyed by cache key.
///
/// There is no background eviction: an entry is only checked, and dropped if
/// stale, when someone looks it up.
#[derive(Debug)]
pub struct ResultCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Lookup statistics
    stats: CacheStats,
    /// Validity window in milliseconds
    expiry_ms: u64,
}

impl<T: Clone> ResultCache<T> {
    // == Constructor ==
    pub fn new(expiry_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            expiry_ms,
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous value and timestamp.
    pub fn insert(&mut self, key: String, value: T, now_ms: u64) {
        self.entries.insert(key, CacheEntry::new(value, now_ms));
    }

    // == Get ==
    /// Retrieves a fresh value by key.
    ///
    /// Expired entries are removed and reported as [`CacheError::Expired`].
    pub fn get(&mut self, key: &str, now_ms: u64) -> Result<T, CacheError> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound(key.to_string()));
        };

        if entry.is_expired(now_ms, self.expiry_ms) {
            self.entries.remove(key);
            self.stats.record_expiration();
            return Err(CacheError::Expired(key.to_string()));
        }

        self.stats.record_hit();
        Ok(entry.value.clone())
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Number of stored entries, including stale ones not yet looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
