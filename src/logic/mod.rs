//! Logic Module - Scoring & Enforcement Engines
//!
//! ## Structure
//! - `features/` - Fixed feature schema and validated vectors
//! - `scoring/` - Heuristic scorer and score combiner
//! - `model/` - Ensemble predictor (logistic, ONNX) and model loading
//! - `content_risk/` - Per-request content risk evaluators
//! - `policy/` - Policy config, action levels, escalation
//! - `engine` - DecisionEngine (`detect`, `enforce`)

pub mod error;

pub mod features;
pub mod scoring;
pub mod model;
pub mod content_risk;
pub mod policy;

pub mod engine;

pub use engine::DecisionEngine;
pub use error::{EngineError, EngineResult};
