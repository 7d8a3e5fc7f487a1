//! Scoring Rules & Weights
//!
//! Constants only. The heuristic terms are tuned so that children score high
//! on each one; the blend weights are a fixed policy choice, not learned.

use serde::Serialize;

// ============================================================================
// BLEND WEIGHTS
// ============================================================================

/// Weight of the rule-based heuristic score (35%)
pub const HEURISTIC_WEIGHT: f32 = 0.35;

/// Weight of the ensemble predictor (65%)
pub const ENSEMBLE_WEIGHT: f32 = 0.65;

/// At or above this risk the subject is treated as a child
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Share of a term's weight it must reach to be reported as a reason
pub const REASON_MIN_SHARE: f32 = 0.5;

// ============================================================================
// HEURISTIC TERMS
// ============================================================================

/// One clipped linear term: `clip((value - offset) / scale, 0, 1) * weight`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeuristicTerm {
    pub feature: &'static str,
    pub offset: f32,
    pub scale: f32,
    pub weight: f32,
    /// Human-readable reason when this term fires
    pub label: &'static str,
}

impl HeuristicTerm {
    /// Weighted contribution of this term for a raw feature value
    pub fn contribution(&self, value: f32) -> f32 {
        ((value - self.offset) / self.scale).clamp(0.0, 1.0) * self.weight
    }
}

/// Weights sum to 1.0
pub const HEURISTIC_TERMS: [HeuristicTerm; 7] = [
    HeuristicTerm {
        feature: "typos_per_100",
        offset: 5.0,
        scale: 10.0,
        weight: 0.15,
        label: "High typing irregularity",
    },
    HeuristicTerm {
        feature: "short_word_ratio",
        offset: 0.4,
        scale: 0.4,
        weight: 0.10,
        label: "Simple short-word vocabulary",
    },
    HeuristicTerm {
        feature: "path_erraticness",
        offset: 0.45,
        scale: 0.4,
        weight: 0.20,
        label: "Erratic touch patterns",
    },
    HeuristicTerm {
        feature: "emoji_ratio",
        offset: 0.15,
        scale: 0.35,
        weight: 0.10,
        label: "Heavy emoji use",
    },
    HeuristicTerm {
        feature: "iki_mean",
        offset: 140.0,
        scale: 120.0,
        weight: 0.10,
        label: "Slow typing cadence",
    },
    HeuristicTerm {
        feature: "swipe_speed_mean",
        offset: 900.0,
        scale: 800.0,
        weight: 0.15,
        label: "Fast swipe gestures",
    },
    HeuristicTerm {
        feature: "rtf_ms",
        offset: 500.0,
        scale: 1000.0,
        weight: 0.20,
        label: "Slow response timing",
    },
];
