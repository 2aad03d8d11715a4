//! User actions and the points they earn

use std::convert::Infallible;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;

/// Action a user performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    StatusPost,
    PhotoPost,
    MessageSent,
    /// Anything unrecognized; earns a single point
    Other(String),
}

impl ActionType {
    /// Points the action can earn, inclusive.
    pub fn points_range(&self) -> RangeInclusive<u64> {
        match self {
            ActionType::StatusPost => 5..=14,
            ActionType::PhotoPost => 10..=29,
            ActionType::MessageSent => 1..=5,
            ActionType::Other(_) => 1..=1,
        }
    }

    /// Draws the points for one occurrence of the action.
    pub fn roll_points<R: Rng>(&self, rng: &mut R) -> u64 {
        rng.gen_range(self.points_range())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActionType::StatusPost => "status_post",
            ActionType::PhotoPost => "photo_post",
            ActionType::MessageSent => "message_sent",
            ActionType::Other(name) => name,
        }
    }
}

impl FromStr for ActionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "status_post" => ActionType::StatusPost,
            "photo_post" => ActionType::PhotoPost,
            "message_sent" => ActionType::MessageSent,
            other => ActionType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
