//! Scoring Module
//!
//! Blends the rule-based heuristic with the ensemble predictor into one
//! bounded risk score.
//!
//! ## Structure
//! - `rules`: Heuristic term table and blend weights
//! - `heuristic`: HeuristicScorer (pure)
//! - `combiner`: ScoreCombiner (heuristic + ensemble)
//! - `types`: ScoreResult, ScoreBreakdown

pub mod rules;
pub mod heuristic;
pub mod combiner;
pub mod types;

pub use rules::{DECISION_THRESHOLD, ENSEMBLE_WEIGHT, HEURISTIC_TERMS, HEURISTIC_WEIGHT};
pub use heuristic::{attribute, heuristic_score};
pub use combiner::ScoreCombiner;
pub use types::{confidence, ScoreBreakdown, ScoreResult};
