//! Content Risk Module - Optional per-request content signals
//!
//! Seven independent evaluators behind the `RiskSignal` trait:
//! toxicity, nsfw, link, live_chat, screen_time, app_install, location.

pub mod app_install;
pub mod link;
pub mod live_chat;
pub mod location;
pub mod nsfw;
mod patterns;
pub mod screen_time;
mod set;
pub mod toxicity;
mod types;

/// Free-text inputs larger than this are refused by the text evaluators
pub const MAX_TEXT_BYTES: usize = 64 * 1024;

pub use set::{ContentRiskConfig, RiskSignalSet, SignalOutcome, UNAVAILABLE_RATIONALE};
pub use types::{ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
