//! Toxicity Evaluator
//!
//! Lexicon match over free text. One ordinary hit is a soft lock; two or
//! more, or any severe phrase, is a hard lock.

use serde::{Deserialize, Serialize};

use super::patterns::PatternSet;
use super::types::{non_empty, ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use super::MAX_TEXT_BYTES;
use crate::logic::error::EngineResult;
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "toxicity";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToxicityConfig {
    /// Regex fragments, matched case-insensitively on word boundaries
    pub insult_terms: Vec<String>,
    pub severe_terms: Vec<String>,
    pub max_input_bytes: usize,
}

impl Default for ToxicityConfig {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            insult_terms: owned(&[
                "idiot",
                "stupid",
                "loser",
                "dumb",
                r"shut\s+up",
                r"hate\s+you",
                "ugly",
                "freak",
                "worthless",
            ]),
            severe_terms: owned(&[
                r"kill\s+yourself",
                "kys",
                r"go\s+die",
                r"i('ll|\s+will)\s+hurt\s+you",
                r"nobody\s+would\s+miss\s+you",
            ]),
            max_input_bytes: MAX_TEXT_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToxicityEvaluator {
    insults: PatternSet,
    severe: PatternSet,
    max_input_bytes: usize,
}

impl ToxicityEvaluator {
    pub fn new(config: &ToxicityConfig) -> EngineResult<Self> {
        Ok(Self {
            insults: PatternSet::new(&config.insult_terms)?,
            severe: PatternSet::new(&config.severe_terms)?,
            max_input_bytes: config.max_input_bytes,
        })
    }
}

impl RiskSignal for ToxicityEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(text) = non_empty(&input.text) else {
            return Ok(RiskVerdict::allow());
        };

        if text.len() > self.max_input_bytes {
            return Err(EvaluatorError::new(
                NAME,
                format!("text exceeds {} bytes", self.max_input_bytes),
            ));
        }

        if self.severe.is_match(text) {
            return Ok(RiskVerdict::new(ActionLevel::HardLock, "Severe toxic language detected"));
        }

        let verdict = match self.insults.count(text) {
            0 => RiskVerdict::allow(),
            1 => RiskVerdict::new(ActionLevel::SoftLock, "Toxic language detected"),
            n => RiskVerdict::new(
                ActionLevel::HardLock,
                format!("Repeated toxic language detected ({} hits)", n),
            ),
        };
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> ToxicityEvaluator {
        ToxicityEvaluator::new(&ToxicityConfig::default()).unwrap()
    }

    fn check(text: &str) -> RiskVerdict {
        evaluator()
            .evaluate(&ContentRisk::default().with_text(text))
            .unwrap()
    }

    #[test]
    fn test_absent_and_clean_text() {
        assert_eq!(evaluator().evaluate(&ContentRisk::default()).unwrap(), RiskVerdict::allow());
        assert_eq!(check("   "), RiskVerdict::allow());
        assert_eq!(check("see you at practice tomorrow"), RiskVerdict::allow());
    }

    #[test]
    fn test_single_insult_soft_lock() {
        assert_eq!(check("you are so STUPID").action, ActionLevel::SoftLock);
    }

    #[test]
    fn test_repeated_insults_hard_lock() {
        let verdict = check("shut up, you idiot loser");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert!(verdict.rationale.contains("3 hits"));
    }

    #[test]
    fn test_same_insult_repeated_hard_lock() {
        let verdict = check("idiot idiot idiot");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Repeated toxic language detected (3 hits)");
    }

    #[test]
    fn test_severe_phrase_hard_lock() {
        assert_eq!(check("just go   die").action, ActionLevel::HardLock);
    }

    #[test]
    fn test_substring_is_not_a_hit() {
        assert_eq!(check("dumbbell workout").action, ActionLevel::Allow);
    }

    #[test]
    fn test_oversized_input_is_error() {
        let config = ToxicityConfig {
            max_input_bytes: 8,
            ..ToxicityConfig::default()
        };
        let evaluator = ToxicityEvaluator::new(&config).unwrap();
        let err = evaluator
            .evaluate(&ContentRisk::default().with_text("a much longer message"))
            .unwrap_err();
        assert_eq!(err.evaluator, NAME);
    }
}
