//! Request DTOs for the server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::rewards::ActionType;

/// Maximum accepted user id length in bytes
pub const MAX_USER_ID_LENGTH: usize = 128;

/// Request body for POST /reward
#[derive(Debug, Clone, Deserialize)]
pub struct RewardRequest {
    /// User receiving the points
    pub user_id: String,
    /// Action name, e.g. `status_post`
    pub action: String,
}

impl RewardRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_user_id(&self.user_id)
    }

    pub fn action_type(&self) -> ActionType {
        match self.action.parse() {
            Ok(action) => action,
            Err(never) => match never {},
        }
    }
}

/// Shared user id check for bodies and path segments.
pub fn validate_user_id(user_id: &str) -> Option<String> {
    if user_id.trim().is_empty() {
        return Some("user_id cannot be empty".to_string());
    }
    if user_id.len() > MAX_USER_ID_LENGTH {
        return Some(format!(
            "user_id exceeds maximum length of {} bytes",
            MAX_USER_ID_LENGTH
        ));
    }
    None
}
