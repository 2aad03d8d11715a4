//! Cache Entry Module
//!
//! Defines a cached operation result stamped with the time it was stored.

// == Cache Entry ==
/// A single cached result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Time the value was stored (Unix milliseconds)
    pub stored_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stored at `now_ms`.
    pub fn new(value: T, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    ///
    /// A clock reading earlier than `stored_at` counts as age 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `expiry_ms`.
    ///
    /// Boundary condition: an entry is valid while its age is strictly less
    /// than the expiry window, so an age equal to the window is expired.
    pub fn is_expired(&self, now_ms: u64, expiry_ms: u64) -> bool {
        self.age_ms(now_ms) >= expiry_ms
    }
}
