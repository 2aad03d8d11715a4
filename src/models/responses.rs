//! Response DTOs for the server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::queue::{CacheStats, ExecutorStatus};
use crate::rewards::{ProfileView, Rank};

/// Response body for GET /status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Operations currently running
    pub in_flight: usize,
    /// Operations waiting for a slot
    pub pending_count: usize,
    /// Entries in the result cache
    pub cache_size: usize,
    /// Configured concurrency limit
    pub max_concurrent: usize,
}

impl StatusResponse {
    pub fn new(status: ExecutorStatus, max_concurrent: usize) -> Self {
        Self {
            in_flight: status.in_flight,
            pending_count: status.pending_count,
            cache_size: status.cache_size,
            max_concurrent,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the operation
    pub misses: u64,
    /// Stale entries discarded at lookup
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    /// Number of entries removed
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: "Cache cleared".to_string(),
            cleared,
        }
    }
}

/// Response body for POST /reward
#[derive(Debug, Clone, Serialize)]
pub struct RewardResponse {
    pub user_id: String,
    pub action: String,
    pub points_earned: u64,
    /// Total after the reward
    pub points: u64,
    pub rank: Rank,
}

impl RewardResponse {
    pub fn new(action: impl Into<String>, points_earned: u64, profile: ProfileView) -> Self {
        Self {
            user_id: profile.user_id,
            action: action.into(),
            points_earned,
            points: profile.points,
            rank: profile.rank,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
