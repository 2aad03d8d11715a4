//! Profile store abstraction
//!
//! The remote store holding user points and rank. [`InMemoryProfileStore`]
//! backs the bundled server and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::rewards::Rank;

/// Stored profile fields relevant to rewards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Accumulated points; a profile that never earned any may have none
    pub points: Option<u64>,
    pub rank: Option<Rank>,
}

/// Fields written back after a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub points: u64,
    pub rank: Rank,
}

/// Remote profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Fetches a profile, or [`StoreError::NotFound`].
    async fn get(&self, user_id: &str) -> Result<Profile, StoreError>;

    /// Writes points and rank for an existing profile.
    async fn update(&self, user_id: &str, update: ProfileUpdate) -> Result<(), StoreError>;
}

// == In-Memory Store ==
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a profile.
    pub async fn insert(&self, user_id: impl Into<String>, profile: Profile) {
        self.profiles.write().await.insert(user_id.into(), profile);
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &str) -> Result<Profile, StoreError> {
        self.profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))
    }

    async fn update(&self, user_id: &str, update: ProfileUpdate) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;

        profile.points = Some(update.points);
        profile.rank = Some(update.rank);
        Ok(())
    }
}
