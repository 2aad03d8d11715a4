//! Reward computation
//!
//! Reads a profile, adds the points earned by an action, recomputes the rank
//! and writes both back. One `get` and at most one `update` per reward.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::error::StoreError;
use crate::rewards::{ProfileStore, ProfileUpdate, Rank};

/// Profile as reported to callers, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub user_id: String,
    pub points: u64,
    pub rank: Rank,
}

#[derive(Clone)]
pub struct RewardService {
    store: Arc<dyn ProfileStore>,
}

impl RewardService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Reads a profile. Missing points count as 0; a missing rank is derived
    /// from the points.
    pub async fn profile(&self, user_id: &str) -> Result<ProfileView, StoreError> {
        let profile = self.store.get(user_id).await?;
        let points = profile.points.unwrap_or(0);

        Ok(ProfileView {
            user_id: user_id.to_string(),
            points,
            rank: profile.rank.unwrap_or_else(|| Rank::for_points(points)),
        })
    }

    /// Credits `points_earned` to the user and stores the resulting rank.
    pub async fn reward(
        &self,
        user_id: &str,
        points_earned: u64,
    ) -> Result<ProfileView, StoreError> {
        match self.apply(user_id, points_earned).await {
            Ok(view) => {
                info!(
                    user_id,
                    points_earned,
                    total = view.points,
                    rank = %view.rank,
                    "reward applied"
                );
                Ok(view)
            }
            Err(e) => {
                error!(user_id, error = %e, "reward failed");
                Err(e)
            }
        }
    }

    async fn apply(&self, user_id: &str, points_earned: u64) -> Result<ProfileView, StoreError> {
        let profile = self.store.get(user_id).await?;

        let points = profile.points.unwrap_or(0).saturating_add(points_earned);
        let rank = Rank::for_points(points);

        self.store
            .update(user_id, ProfileUpdate { points, rank })
            .await?;

        Ok(ProfileView {
            user_id: user_id.to_string(),
            points,
            rank,
        })
    }
}

impl std::fmt::Debug for RewardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardService").finish_non_exhaustive()
    }
}
