//! Risk Signal Set
//!
//! The seven evaluators, run together. A failing evaluator never aborts the
//! others; its slot becomes a conservative `soft_lock`.

use serde::{Deserialize, Serialize};

use super::app_install::{AppInstallConfig, AppInstallEvaluator};
use super::link::{LinkConfig, LinkEvaluator};
use super::live_chat::{LiveChatConfig, LiveChatEvaluator};
use super::location::LocationEvaluator;
use super::nsfw::{NsfwConfig, NsfwEvaluator};
use super::screen_time::{ScreenTimeConfig, ScreenTimeEvaluator};
use super::toxicity::{ToxicityConfig, ToxicityEvaluator};
use super::types::{ContentRisk, RiskSignal, RiskVerdict};
use crate::logic::error::EngineResult;
use crate::logic::policy::ActionLevel;

pub const UNAVAILABLE_RATIONALE: &str = "risk signal unavailable";

/// Per-evaluator tuning. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRiskConfig {
    pub toxicity: ToxicityConfig,
    pub nsfw: NsfwConfig,
    pub link: LinkConfig,
    pub live_chat: LiveChatConfig,
    pub screen_time: ScreenTimeConfig,
    pub app_install: AppInstallConfig,
}

/// One evaluator's outcome, attributed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalOutcome {
    pub signal: &'static str,
    pub verdict: RiskVerdict,
}

pub struct RiskSignalSet {
    signals: Vec<Box<dyn RiskSignal>>,
}

impl RiskSignalSet {
    pub fn new(signals: Vec<Box<dyn RiskSignal>>) -> Self {
        Self { signals }
    }

    /// Default evaluators with built-in lexicons and limits
    pub fn standard() -> EngineResult<Self> {
        Self::from_config(&ContentRiskConfig::default())
    }

    pub fn from_config(config: &ContentRiskConfig) -> EngineResult<Self> {
        let signals: Vec<Box<dyn RiskSignal>> = vec![
            Box::new(ToxicityEvaluator::new(&config.toxicity)?),
            Box::new(NsfwEvaluator::new(&config.nsfw)?),
            Box::new(LinkEvaluator::new(&config.link)?),
            Box::new(LiveChatEvaluator::new(&config.live_chat)?),
            Box::new(ScreenTimeEvaluator::new(&config.screen_time)),
            Box::new(AppInstallEvaluator::new(&config.app_install)),
            Box::new(LocationEvaluator),
        ];
        Ok(Self::new(signals))
    }

    /// Swap the evaluator with the same name, or append it if none matches
    pub fn replace(mut self, signal: Box<dyn RiskSignal>) -> Self {
        match self.signals.iter().position(|s| s.name() == signal.name()) {
            Some(idx) => self.signals[idx] = signal,
            None => self.signals.push(signal),
        }
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.signals.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Run every evaluator in registration order
    pub fn evaluate_all(&self, input: &ContentRisk) -> Vec<SignalOutcome> {
        self.signals
            .iter()
            .map(|signal| {
                let verdict = match signal.evaluate(input) {
                    Ok(verdict) => verdict,
                    Err(e) => {
                        log::warn!("Risk signal failed, escalating conservatively: {}", e);
                        RiskVerdict::new(ActionLevel::SoftLock, UNAVAILABLE_RATIONALE)
                    }
                };
                if verdict.is_triggered() {
                    log::debug!("Signal {} -> {} ({})", signal.name(), verdict.action, verdict.rationale);
                }
                SignalOutcome {
                    signal: signal.name(),
                    verdict,
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for RiskSignalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskSignalSet")
            .field("signals", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::content_risk::types::EvaluatorError;

    struct Broken;

    impl RiskSignal for Broken {
        fn name(&self) -> &'static str {
            "nsfw"
        }

        fn evaluate(&self, _input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
            Err(EvaluatorError::new("nsfw", "classifier timed out"))
        }
    }

    #[test]
    fn test_standard_has_seven_signals() {
        let set = RiskSignalSet::standard().unwrap();
        assert_eq!(
            set.names(),
            vec!["toxicity", "nsfw", "link", "live_chat", "screen_time", "app_install", "location"]
        );
    }

    #[test]
    fn test_empty_input_all_allow() {
        let set = RiskSignalSet::standard().unwrap();
        let outcomes = set.evaluate_all(&ContentRisk::default());
        assert_eq!(outcomes.len(), 7);
        assert!(outcomes.iter().all(|o| o.verdict == RiskVerdict::allow()));
    }

    #[test]
    fn test_replace_keeps_position() {
        let set = RiskSignalSet::standard().unwrap().replace(Box::new(Broken));
        assert_eq!(set.len(), 7);
        assert_eq!(set.names()[1], "nsfw");
    }

    #[test]
    fn test_failing_signal_escalates_others_still_run() {
        let set = RiskSignalSet::standard().unwrap().replace(Box::new(Broken));
        let input = ContentRisk::default().with_sharing(true);
        let outcomes = set.evaluate_all(&input);

        let nsfw = outcomes.iter().find(|o| o.signal == "nsfw").unwrap();
        assert_eq!(nsfw.verdict.action, ActionLevel::SoftLock);
        assert_eq!(nsfw.verdict.rationale, UNAVAILABLE_RATIONALE);

        let location = outcomes.iter().find(|o| o.signal == "location").unwrap();
        assert_eq!(location.verdict.action, ActionLevel::NotifyGuardian);
    }

    #[test]
    fn test_config_from_yaml_partial() {
        let config: ContentRiskConfig =
            serde_yaml::from_str("screen_time:\n  limit_secs: 600\napp_install:\n  denylist: [\"bad.app\"]\n")
                .unwrap();
        assert_eq!(config.screen_time.limit_secs, 600.0);
        assert_eq!(config.app_install.denylist, vec!["bad.app".to_string()]);
        assert_eq!(config.toxicity, ToxicityConfig::default());
    }
}
