//! Policy Module
//!
//! Turns a risk score, optional content signals and the operator policy into
//! one enforcement action.
//!
//! ## Structure
//! - `types`: ActionLevel, PolicyDecision
//! - `config`: PolicyConfig, BedtimeWindow, PolicyStore
//! - `engine`: PolicyEvaluator and the escalation fold
//!
//! ## Usage
//! ```ignore
//! use crate::logic::policy::{PolicyEvaluator, PolicyStore};
//!
//! let evaluator = PolicyEvaluator::standard()?;
//! let decision = evaluator.evaluate(&score, Some(&content), &store.current(), now);
//! match decision.action {
//!     ActionLevel::Allow => {}
//!     ActionLevel::NotifyGuardian => notify(&decision.reasons),
//!     _ => lock(decision.action),
//! }
//! ```

pub mod types;
pub mod config;
pub mod engine;


pub use types::{ActionLevel, PolicyDecision};
pub use config::{parse_clock_time, BedtimeWindow, PolicyConfig, PolicyStore, SESSION_MINUTES_LIMIT};
pub use engine::{decide, escalate, PolicyEvaluator, BEDTIME_REASON};
