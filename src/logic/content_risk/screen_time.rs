//! Screen Time Evaluator

use serde::{Deserialize, Serialize};

use super::types::{ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "screen_time";

/// Continuous session limit in seconds
pub const DEFAULT_SESSION_LIMIT_SECS: f64 = 1200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenTimeConfig {
    pub limit_secs: f64,
}

impl Default for ScreenTimeConfig {
    fn default() -> Self {
        Self {
            limit_secs: DEFAULT_SESSION_LIMIT_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenTimeEvaluator {
    limit_secs: f64,
}

impl ScreenTimeEvaluator {
    pub fn new(config: &ScreenTimeConfig) -> Self {
        Self {
            limit_secs: config.limit_secs,
        }
    }
}

impl Default for ScreenTimeEvaluator {
    fn default() -> Self {
        Self::new(&ScreenTimeConfig::default())
    }
}

impl RiskSignal for ScreenTimeEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(duration) = input.session_duration_secs else {
            return Ok(RiskVerdict::allow());
        };

        if !duration.is_finite() || duration < 0.0 {
            return Err(EvaluatorError::new(NAME, format!("invalid session duration {}", duration)));
        }

        let minutes = |secs: f64| (secs / 60.0).round() as i64;
        let verdict = if duration >= 2.0 * self.limit_secs {
            RiskVerdict::new(
                ActionLevel::HardLock,
                format!(
                    "Screen-time limit far exceeded ({} min, limit {} min)",
                    minutes(duration),
                    minutes(self.limit_secs)
                ),
            )
        } else if duration > self.limit_secs {
            RiskVerdict::new(
                ActionLevel::SoftLock,
                format!(
                    "Screen-time limit exceeded ({} min, limit {} min)",
                    minutes(duration),
                    minutes(self.limit_secs)
                ),
            )
        } else {
            RiskVerdict::allow()
        };
        Ok(verdict)
    }
}
