//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults. Every default can be
//! overridden from the environment, and the CLI flags override both.

use std::path::PathBuf;

use crate::logic::features::SchemaMode;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "ChildSafe";

/// Directory under the platform data dir that holds model files
pub const MODEL_SUBDIR: &str = "models";

/// Default policy file, relative to the working directory
pub const DEFAULT_POLICY_PATH: &str = "policy.yaml";

pub const ENV_MODEL_DIR: &str = "CHILDSAFE_MODEL_DIR";
pub const ENV_POLICY_PATH: &str = "CHILDSAFE_POLICY_PATH";
pub const ENV_SCHEMA_MODE: &str = "CHILDSAFE_SCHEMA_MODE";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Platform default, e.g. `~/.local/share/ChildSafe/models`
pub fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(MODEL_SUBDIR)
}

/// Get schema mode from environment. Unparseable values fall back to lenient.
pub fn get_schema_mode() -> SchemaMode {
    std::env::var(ENV_SCHEMA_MODE)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_dir_layout() {
        let dir = default_model_dir();
        assert!(dir.ends_with(PathBuf::from(APP_NAME).join(MODEL_SUBDIR)));
    }

    #[test]
    fn test_default_policy_path() {
        assert_eq!(PathBuf::from(DEFAULT_POLICY_PATH).file_name().unwrap(), "policy.yaml");
    }
}
