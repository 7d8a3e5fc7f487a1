//! Heuristic Scorer
//!
//! Pure rule-based score in [0,1]. Deterministic, no failure modes: a
//! `FeatureVector` is complete by construction.

use super::rules::{HeuristicTerm, HEURISTIC_TERMS, REASON_MIN_SHARE};
use crate::logic::features::FeatureVector;

fn term_contribution(term: &HeuristicTerm, features: &FeatureVector) -> f32 {
    // Term names are checked against the layout in rules::tests
    let value = features.get_by_name(term.feature).unwrap_or_default();
    term.contribution(value)
}

/// Weighted sum of the clipped heuristic terms
pub fn heuristic_score(features: &FeatureVector) -> f32 {
    HEURISTIC_TERMS
        .iter()
        .map(|term| term_contribution(term, features))
        .sum::<f32>()
        .clamp(0.0, 1.0)
}

/// Labels of the terms carrying at least half their weight, in term order
pub fn attribute(features: &FeatureVector) -> Vec<String> {
    HEURISTIC_TERMS
        .iter()
        .filter(|term| term_contribution(term, features) >= term.weight * REASON_MIN_SHARE)
        .map(|term| term.label.to_string())
        .collect()
}
