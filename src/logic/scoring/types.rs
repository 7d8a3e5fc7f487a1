//! Scoring Types
//!
//! Data only. `ScoreResult` is the output of `Detect`.

use serde::{Deserialize, Serialize};

use super::rules::DECISION_THRESHOLD;

/// Heuristic uncertainty proxy: `1 - (risk - 0.5)^2`, always in [0.75, 1.0].
/// Not a calibrated interval.
pub fn confidence(risk: f32) -> f32 {
    1.0 - (risk - 0.5).powi(2)
}

/// Breakdown of how the blended risk was calculated
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub heuristic: f32,
    pub ensemble: f32,
    pub heuristic_contribution: f32,
    pub ensemble_contribution: f32,
}

/// Result of blending heuristic and ensemble scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Likelihood the subject is a child, in [0,1]
    pub risk: f32,
    pub confidence: f32,
    pub reasons: Vec<String>,
    pub threshold: f32,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub fn new(risk: f32, reasons: Vec<String>, breakdown: ScoreBreakdown) -> Self {
        let risk = risk.clamp(0.0, 1.0);
        Self {
            risk,
            confidence: confidence(risk),
            reasons,
            threshold: DECISION_THRESHOLD,
            breakdown,
        }
    }

    pub fn is_child(&self) -> bool {
        self.risk >= self.threshold
    }
}
