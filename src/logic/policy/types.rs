//! Policy Types
//!
//! Enforcement levels and the decision record. Data only.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// ACTION LEVEL
// ============================================================================

/// Enforcement severity.
///
/// Ordering comes from `rank()` only, never from the wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionLevel {
    #[default]
    #[serde(rename = "allow")]
    Allow,
    #[serde(rename = "soft_lock")]
    SoftLock,
    #[serde(rename = "hard_lock")]
    HardLock,
    #[serde(rename = "PIN_challenge")]
    PinChallenge,
    #[serde(rename = "notify_guardian")]
    NotifyGuardian,
}

impl ActionLevel {
    pub const ALL: [ActionLevel; 5] = [
        ActionLevel::Allow,
        ActionLevel::SoftLock,
        ActionLevel::HardLock,
        ActionLevel::PinChallenge,
        ActionLevel::NotifyGuardian,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            ActionLevel::Allow => 0,
            ActionLevel::SoftLock => 1,
            ActionLevel::HardLock => 2,
            ActionLevel::PinChallenge => 3,
            ActionLevel::NotifyGuardian => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLevel::Allow => "allow",
            ActionLevel::SoftLock => "soft_lock",
            ActionLevel::HardLock => "hard_lock",
            ActionLevel::PinChallenge => "PIN_challenge",
            ActionLevel::NotifyGuardian => "notify_guardian",
        }
    }

    /// The more severe of `self` and `other`
    pub fn escalate(self, other: ActionLevel) -> ActionLevel {
        self.max(other)
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, ActionLevel::Allow)
    }
}

impl Ord for ActionLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for ActionLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ActionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionLevel::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action level: {}", s))
    }
}

// ============================================================================
// POLICY DECISION
// ============================================================================

/// Outcome of one enforcement request. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub risk: f32,
    pub confidence: f32,
    /// Policy reasons only (bedtime, triggered risk signals)
    pub reasons: Vec<String>,
    pub action: ActionLevel,
    pub policy_version: String,
    pub feature_flags: BTreeMap<String, bool>,
    pub limits: BTreeMap<String, i64>,
}
