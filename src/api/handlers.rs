//! API Handlers
//!
//! HTTP request handlers. Every profile store call goes through the shared
//! executor, so the store never sees more than `max_concurrent` requests at a
//! time.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{
    validate_user_id, ClearCacheResponse, HealthResponse, RewardRequest, RewardResponse,
    StatsResponse, StatusResponse,
};
use crate::queue::Executor;
use crate::rewards::{InMemoryProfileStore, Profile, ProfileStore, ProfileView, RewardService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Admission controller in front of the profile store
    pub executor: Executor<ProfileView>,
    /// Reward logic over the profile store
    pub rewards: RewardService,
    /// Backing store, kept for profile registration
    pub profiles: Arc<InMemoryProfileStore>,
}

impl AppState {
    /// Creates a new AppState around an executor and an in-memory store.
    pub fn new(executor: Executor<ProfileView>, profiles: Arc<InMemoryProfileStore>) -> Self {
        let store: Arc<dyn ProfileStore> = profiles.clone();
        Self {
            executor,
            rewards: RewardService::new(store),
            profiles,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        let executor = Executor::new(config.executor())?;
        Ok(Self::new(executor, Arc::new(InMemoryProfileStore::new())))
    }
}

/// Cache key for profile reads.
pub fn profile_cache_key(user_id: &str) -> String {
    format!("profile:{user_id}")
}

/// Handler for GET /status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::new(
        state.executor.status(),
        state.executor.config().max_concurrent,
    ))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.executor.cache_stats().into())
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    Json(ClearCacheResponse::new(state.executor.clear_cache()))
}

/// Handler for GET /profile/:user_id
///
/// Reads are cached per user for the executor's expiry window.
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>> {
    if let Some(error_msg) = validate_user_id(&user_id) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let key = profile_cache_key(&user_id);
    let rewards = state.rewards.clone();
    let view = state
        .executor
        .submit(
            move || async move { rewards.profile(&user_id).await },
            Some(&key),
        )
        .await?;

    Ok(Json(view))
}

/// Handler for PUT /profile/:user_id
///
/// Registers an empty profile (0 points, Bronze). Existing profiles are reset.
pub async fn create_profile_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<ProfileView>)> {
    if let Some(error_msg) = validate_user_id(&user_id) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.profiles.insert(user_id.clone(), Profile::default()).await;

    let rewards = state.rewards.clone();
    let view = state
        .executor
        .submit(move || async move { rewards.profile(&user_id).await }, None)
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Handler for POST /reward
///
/// Rolls the points for the action and credits them through the executor.
pub async fn reward_handler(
    State(state): State<AppState>,
    Json(req): Json<RewardRequest>,
) -> Result<Json<RewardResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let action = req.action_type();
    let points_earned = action.roll_points(&mut rand::thread_rng());

    let rewards = state.rewards.clone();
    let user_id = req.user_id;
    let view = state
        .executor
        .submit(
            move || async move { rewards.reward(&user_id, points_earned).await },
            None,
        )
        .await?;

    Ok(Json(RewardResponse::new(
        action.to_string(),
        points_earned,
        view,
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
