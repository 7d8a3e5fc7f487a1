//! ChildSafe Core - child/adult risk scoring and enforcement decisions
//!
//! `detect` blends a rule-based heuristic with an ensemble of trained models
//! into one risk score. `enforce` runs the same score through the operator
//! policy (bedtime window) and seven content-risk signals to pick an action.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::{DecisionEngine, EngineError, EngineResult};
