//! Request and Response models for the server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_user_id, RewardRequest};
pub use responses::{
    ClearCacheResponse, HealthResponse, RewardResponse, StatsResponse, StatusResponse,
};
