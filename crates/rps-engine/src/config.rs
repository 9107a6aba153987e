//! Engine configuration

use serde::{Deserialize, Serialize};

/// What `make_move` does once both moves of a match are recorded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostResolution {
    /// Fail with `MatchError::AlreadyResolved`
    #[default]
    Reject,
    /// Accept the call and change nothing
    Ignore,
}

/// Tunables for a [`crate::MatchEngine`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub post_resolution: PostResolution,
    /// Upper bound on one side's bet balance (`None` = only `u64` itself)
    pub max_bet_balance: Option<u64>,
    /// Keep a journal of successful mutations
    pub record_events: bool,
}

impl EngineConfig {
    /// Reject late moves, no balance cap, journal on
    pub fn standard() -> Self {
        Self {
            post_resolution: PostResolution::Reject,
            max_bet_balance: None,
            record_events: true,
        }
    }

    /// Parse a JSON document; missing fields fall back to [`EngineConfig::standard`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
