//! Content Risk Types
//!
//! Input record, verdict, and the evaluator seam. Each evaluator reads one
//! field of `ContentRisk`; absent or empty input is always `allow`.

use serde::{Deserialize, Serialize};

use crate::logic::policy::ActionLevel;

// ============================================================================
// INPUT
// ============================================================================

/// Optional per-request content signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRisk {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub chat_text: Option<String>,
    #[serde(default, alias = "session_duration")]
    pub session_duration_secs: Option<f64>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub sharing: Option<bool>,
}

impl ContentRisk {
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_image_url(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_chat_text(mut self, text: &str) -> Self {
        self.chat_text = Some(text.to_string());
        self
    }

    pub fn with_session_duration(mut self, secs: f64) -> Self {
        self.session_duration_secs = Some(secs);
        self
    }

    pub fn with_app_id(mut self, app_id: &str) -> Self {
        self.app_id = Some(app_id.to_string());
        self
    }

    pub fn with_sharing(mut self, sharing: bool) -> Self {
        self.sharing = Some(sharing);
        self
    }
}

/// Trimmed, non-empty view of an optional string field
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub action: ActionLevel,
    pub rationale: String,
}

impl RiskVerdict {
    pub fn allow() -> Self {
        Self {
            action: ActionLevel::Allow,
            rationale: String::new(),
        }
    }

    pub fn new(action: ActionLevel, rationale: impl Into<String>) -> Self {
        Self {
            action,
            rationale: rationale.into(),
        }
    }

    pub fn is_triggered(&self) -> bool {
        !self.action.is_allow()
    }
}

// ============================================================================
// EVALUATOR SEAM
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{evaluator} unavailable: {message}")]
pub struct EvaluatorError {
    pub evaluator: String,
    pub message: String,
}

impl EvaluatorError {
    pub fn new(evaluator: &str, message: impl Into<String>) -> Self {
        Self {
            evaluator: evaluator.to_string(),
            message: message.into(),
        }
    }
}

/// One independently replaceable content-risk scorer
pub trait RiskSignal: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError>;
}
