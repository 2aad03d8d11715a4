//! Rewards Module
//!
//! Points and rank bookkeeping for user actions, persisted through a
//! [`ProfileStore`].

mod action;
mod rank;
mod service;
mod store;

pub use action::ActionType;
pub use rank::Rank;
pub use service::{ProfileView, RewardService};
pub use store::{InMemoryProfileStore, Profile, ProfileStore, ProfileUpdate};
