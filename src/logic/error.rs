//! Engine Errors
//!
//! Structural errors are never retried: feature errors belong to the caller,
//! model and config errors to the operator.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Required feature columns are absent (or the vector layout is stale)
    #[error("feature mismatch: missing {missing:?}")]
    FeatureMismatch { missing: Vec<String> },

    /// Unrecognized keys in strict schema mode
    #[error("unknown features: {names:?}")]
    UnknownFeature { names: Vec<String> },

    #[error("feature {name} is not a finite number")]
    NonFiniteFeature { name: String },

    /// No predictor could be loaded; refuse to serve
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl EngineError {
    /// Errors caused by the request payload rather than the deployment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::FeatureMismatch { .. }
                | EngineError::UnknownFeature { .. }
                | EngineError::NonFiniteFeature { .. }
        )
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(err: serde_yaml::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_split() {
        assert!(EngineError::FeatureMismatch { missing: vec!["iki_mean".into()] }.is_client_error());
        assert!(EngineError::NonFiniteFeature { name: "rtf_ms".into() }.is_client_error());
        assert!(!EngineError::ModelUnavailable("empty".into()).is_client_error());
        assert!(!EngineError::Config("bad".into()).is_client_error());
    }

    #[test]
    fn test_display_lists_missing() {
        let err = EngineError::FeatureMismatch { missing: vec!["rtf_ms".into()] };
        assert!(err.to_string().contains("rtf_ms"));
    }
}
