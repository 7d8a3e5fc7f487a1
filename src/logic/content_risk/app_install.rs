//! App Install Evaluator
//!
//! Denylisted package ids are blocked outright. Ids that name an
//! age-restricted category need the guardian PIN.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{non_empty, ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "app_install";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInstallConfig {
    /// Exact package ids, compared case-insensitively
    pub denylist: Vec<String>,
    /// Substrings of a package id that mark an age-restricted category
    pub restricted_keywords: Vec<String>,
}

impl Default for AppInstallConfig {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            denylist: owned(&["known-malicious"]),
            restricted_keywords: owned(&["casino", "gambling", "betting", "poker", "slots", "dating"]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppInstallEvaluator {
    denylist: HashSet<String>,
    restricted_keywords: Vec<String>,
}

impl AppInstallEvaluator {
    pub fn new(config: &AppInstallConfig) -> Self {
        Self {
            denylist: config.denylist.iter().map(|id| id.trim().to_lowercase()).collect(),
            restricted_keywords: config
                .restricted_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

impl Default for AppInstallEvaluator {
    fn default() -> Self {
        Self::new(&AppInstallConfig::default())
    }
}

impl RiskSignal for AppInstallEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(app_id) = non_empty(&input.app_id) else {
            return Ok(RiskVerdict::allow());
        };
        let normalized = app_id.to_lowercase();

        if self.denylist.contains(&normalized) {
            return Ok(RiskVerdict::new(
                ActionLevel::HardLock,
                format!("App {} is on the install denylist", app_id),
            ));
        }

        if let Some(keyword) = self.restricted_keywords.iter().find(|k| normalized.contains(k.as_str())) {
            return Ok(RiskVerdict::new(
                ActionLevel::PinChallenge,
                format!("Age-restricted app ({}) requires guardian PIN", keyword),
            ));
        }

        Ok(RiskVerdict::allow())
    }
}
