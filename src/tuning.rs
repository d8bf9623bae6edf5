//! Data-driven game balance
//!
//! Everything a playtest might want to turn without recompiling. Values are
//! validated before a session is built; a bad file fails fast instead of
//! producing undefined geometry mid-game.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an endless session ends once a bird exits past the left edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EndlessEndPolicy {
    /// Freeze the session on the first exit and report the live-bird count
    #[default]
    FirstExit,
    /// Halt spawning on the first exit, despawn each escapee, and report the
    /// peak live-bird count once the field is empty
    Drain,
}

impl EndlessEndPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndlessEndPolicy::FirstExit => "first-exit",
            EndlessEndPolicy::Drain => "drain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first-exit" | "first" => Some(EndlessEndPolicy::FirstExit),
            "drain" => Some(EndlessEndPolicy::Drain),
            _ => None,
        }
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Score at which a side wins the normal game
    pub win_threshold: u32,
    /// Fraction of the bird's half-width that must cross a paddle edge
    /// before a bounce triggers; historically between 0.5 and 1.0
    pub hit_margin_fraction: f32,
    /// Ticks between endless-mode spawns
    pub spawn_interval_ticks: u64,
    /// Ticks a "scored" banner stays up before reverting to the score line
    pub banner_ticks: u32,
    pub endless_end_policy: EndlessEndPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_threshold: 5,
            hit_margin_fraction: 0.75,
            spawn_interval_ticks: 90,
            banner_ticks: 45,
            endless_end_policy: EndlessEndPolicy::default(),
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    ZeroWinThreshold,
    HitMarginOutOfRange(f32),
    ZeroSpawnInterval,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::ZeroWinThreshold => write!(f, "win threshold must be at least 1"),
            TuningError::HitMarginOutOfRange(v) => {
                write!(f, "hit margin fraction {v} outside [0.5, 1.0]")
            }
            TuningError::ZeroSpawnInterval => write!(f, "spawn interval must be at least 1 tick"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check the knobs before building a session
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.win_threshold == 0 {
            return Err(TuningError::ZeroWinThreshold);
        }
        if !(0.5..=1.0).contains(&self.hit_margin_fraction) {
            return Err(TuningError::HitMarginOutOfRange(self.hit_margin_fraction));
        }
        if self.spawn_interval_ticks == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }
        Ok(())
    }

    /// Parse from JSON (playtest overrides)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
