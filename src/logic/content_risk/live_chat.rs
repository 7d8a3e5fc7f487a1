//! Live Chat Evaluator
//!
//! Grooming and secrecy cues call the guardian in; requests for personal
//! details ask for the guardian PIN before the chat continues.

use serde::{Deserialize, Serialize};

use super::patterns::PatternSet;
use super::types::{non_empty, ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use super::MAX_TEXT_BYTES;
use crate::logic::error::EngineResult;
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "live_chat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveChatConfig {
    pub grooming_patterns: Vec<String>,
    pub personal_info_patterns: Vec<String>,
    pub max_input_bytes: usize,
}

impl Default for LiveChatConfig {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            grooming_patterns: owned(&[
                r"(don'?t|do\s+not)\s+tell\s+(your\s+)?(mom|mum|dad|parents?|anyone)",
                r"keep\s+(it|this)\s+(a\s+)?secret",
                r"our\s+(little\s+)?secret",
                r"send\s+(me\s+)?(a\s+)?(pic|pics|photo|photos|picture|pictures)",
                r"meet\s+(me\s+)?(up\s+)?(in\s+person|irl|alone)",
                r"are\s+you\s+(home\s+)?alone",
            ]),
            personal_info_patterns: owned(&[
                r"what('?s|\s+is)\s+your\s+(home\s+)?(address|phone|number|school)",
                r"where\s+do\s+you\s+live",
                r"which\s+school",
                r"your\s+(home\s+)?address",
            ]),
            max_input_bytes: MAX_TEXT_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiveChatEvaluator {
    grooming: PatternSet,
    personal_info: PatternSet,
    max_input_bytes: usize,
}

impl LiveChatEvaluator {
    pub fn new(config: &LiveChatConfig) -> EngineResult<Self> {
        Ok(Self {
            grooming: PatternSet::new(&config.grooming_patterns)?,
            personal_info: PatternSet::new(&config.personal_info_patterns)?,
            max_input_bytes: config.max_input_bytes,
        })
    }
}

impl RiskSignal for LiveChatEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(chat) = non_empty(&input.chat_text) else {
            return Ok(RiskVerdict::allow());
        };

        if chat.len() > self.max_input_bytes {
            return Err(EvaluatorError::new(
                NAME,
                format!("chat text exceeds {} bytes", self.max_input_bytes),
            ));
        }

        if self.grooming.is_match(chat) {
            return Ok(RiskVerdict::new(
                ActionLevel::NotifyGuardian,
                "Possible grooming pattern in live chat",
            ));
        }
        if self.personal_info.is_match(chat) {
            return Ok(RiskVerdict::new(
                ActionLevel::PinChallenge,
                "Request for personal information in live chat",
            ));
        }
        Ok(RiskVerdict::allow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(chat: &str) -> RiskVerdict {
        LiveChatEvaluator::new(&LiveChatConfig::default())
            .unwrap()
            .evaluate(&ContentRisk::default().with_chat_text(chat))
            .unwrap()
    }

    #[test]
    fn test_ordinary_chat() {
        assert_eq!(check("gg, want to play another round?"), RiskVerdict::allow());
    }

    #[test]
    fn test_secrecy_notifies_guardian() {
        assert_eq!(check("this is our little secret ok").action, ActionLevel::NotifyGuardian);
        assert_eq!(check("Don't tell your parents").action, ActionLevel::NotifyGuardian);
    }

    #[test]
    fn test_personal_info_pin_challenge() {
        let verdict = check("so where do you live?");
        assert_eq!(verdict.action, ActionLevel::PinChallenge);
        assert_eq!(verdict.rationale, "Request for personal information in live chat");
    }

    #[test]
    fn test_grooming_outranks_personal_info() {
        let verdict = check("what's your address? keep it a secret");
        assert_eq!(verdict.action, ActionLevel::NotifyGuardian);
    }
}
