//! API Module
//!
//! Structure:
//! - commands.rs: request/response DTOs and the engine commands
//!   (`detect`, `enforce`, `health`, `schema`)
//! - runtime.rs: startup loading of policy and models

pub mod commands;
pub mod runtime;

// Re-export current version as default
pub use commands::*;
pub use runtime::{Runtime, RuntimeOptions};
