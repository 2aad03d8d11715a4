//! Queue Module
//!
//! Admission-controlled execution of asynchronous operations with a
//! time-bounded result cache.

mod cache;
mod entry;
mod executor;
mod stats;
mod submission;


// Re-export public types
pub use cache::ResultCache;
pub use entry::CacheEntry;
pub use executor::{Executor, ExecutorStatus};
pub use stats::CacheStats;
pub use submission::Submission;
