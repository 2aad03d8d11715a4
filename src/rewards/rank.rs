//! Rank thresholds

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rank earned by accumulating points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Rank {
    /// Every rank with its minimum points, lowest first.
    pub const THRESHOLDS: [(Rank, u64); 5] = [
        (Rank::Bronze, 0),
        (Rank::Silver, 100),
        (Rank::Gold, 250),
        (Rank::Platinum, 500),
        (Rank::Diamond, 1000),
    ];

    /// Highest rank whose threshold `points` reaches.
    pub fn for_points(points: u64) -> Rank {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(_, min)| points >= *min)
            .map_or(Rank::Bronze, |(rank, _)| *rank)
    }

    pub fn min_points(self) -> u64 {
        Self::THRESHOLDS[self as usize].1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
