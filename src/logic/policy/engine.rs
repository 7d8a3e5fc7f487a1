//! Policy Engine
//!
//! Decision logic only. Input: ScoreResult + optional ContentRisk +
//! PolicyConfig + wall-clock time. Output: PolicyDecision.
//!
//! Escalation is a max-fold over the `ActionLevel` total order, so the
//! final action does not depend on the order signals are evaluated in.

use chrono::NaiveDateTime;

use super::config::PolicyConfig;
use super::types::{ActionLevel, PolicyDecision};
use crate::logic::content_risk::{ContentRisk, RiskSignalSet, RiskVerdict};
use crate::logic::error::EngineResult;
use crate::logic::scoring::ScoreResult;

pub const BEDTIME_REASON: &str = "Bedtime policy";

// ============================================================================
// ESCALATION
// ============================================================================

/// Most severe level in `levels`, `allow` when empty
pub fn escalate<I>(levels: I) -> ActionLevel
where
    I: IntoIterator<Item = ActionLevel>,
{
    levels
        .into_iter()
        .fold(ActionLevel::Allow, ActionLevel::escalate)
}

/// Assemble a decision from already-computed inputs. Pure.
///
/// Triggered verdicts contribute their rationale in the order given; the
/// action is the max of all of them and the bedtime floor.
pub fn decide(
    score: &ScoreResult,
    bedtime_active: bool,
    verdicts: &[RiskVerdict],
    config: &PolicyConfig,
) -> PolicyDecision {
    let mut action = ActionLevel::Allow;
    let mut reasons = Vec::new();

    if bedtime_active {
        action = action.escalate(ActionLevel::SoftLock);
        reasons.push(BEDTIME_REASON.to_string());
    }

    for verdict in verdicts.iter().filter(|v| v.is_triggered()) {
        action = action.escalate(verdict.action);
        reasons.push(verdict.rationale.clone());
    }

    PolicyDecision {
        risk: score.risk,
        confidence: score.confidence,
        reasons,
        action,
        policy_version: config.version.clone(),
        feature_flags: config.feature_flags.clone(),
        limits: config.limits.clone(),
    }
}

// ============================================================================
// EVALUATOR
// ============================================================================

#[derive(Debug)]
pub struct PolicyEvaluator {
    signals: RiskSignalSet,
}

impl PolicyEvaluator {
    pub fn new(signals: RiskSignalSet) -> Self {
        Self { signals }
    }

    pub fn standard() -> EngineResult<Self> {
        Ok(Self::new(RiskSignalSet::standard()?))
    }

    pub fn signals(&self) -> &RiskSignalSet {
        &self.signals
    }

    pub fn evaluate(
        &self,
        score: &ScoreResult,
        content_risk: Option<&ContentRisk>,
        config: &PolicyConfig,
        now: NaiveDateTime,
    ) -> PolicyDecision {
        let bedtime_active = config.bedtime_window.contains(now.time());

        let verdicts: Vec<RiskVerdict> = match content_risk {
            Some(input) => self
                .signals
                .evaluate_all(input)
                .into_iter()
                .map(|outcome| outcome.verdict)
                .collect(),
            None => Vec::new(),
        };

        let decision = decide(score, bedtime_active, &verdicts, config);

        log::debug!(
            "Policy {} at {}: bedtime={} action={} reasons={:?}",
            config.version,
            now.format("%H:%M:%S"),
            bedtime_active,
            decision.action,
            decision.reasons
        );

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::policy::BedtimeWindow;
    use crate::logic::scoring::ScoreBreakdown;
    use chrono::NaiveDate;

    fn score(risk: f32) -> ScoreResult {
        ScoreResult::new(risk, vec!["Erratic touch patterns".to_string()], ScoreBreakdown::default())
    }

    fn config() -> PolicyConfig {
        PolicyConfig::new("v-test", BedtimeWindow::parse("22:00", "06:00").unwrap())
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_escalate_empty_is_allow() {
        assert_eq!(escalate(Vec::new()), ActionLevel::Allow);
    }

    #[test]
    fn test_escalate_picks_rank_max() {
        let levels = [ActionLevel::HardLock, ActionLevel::PinChallenge, ActionLevel::SoftLock];
        assert_eq!(escalate(levels), ActionLevel::PinChallenge);
    }

    #[test]
    fn test_decide_echoes_config_and_score() {
        let mut config = config();
        config.feature_flags.insert("allow_chat".to_string(), false);
        config.limits.insert("daily_minutes".to_string(), 90);

        let decision = decide(&score(0.8), false, &[], &config);
        assert_eq!(decision.policy_version, "v-test");
        assert_eq!(decision.feature_flags.get("allow_chat"), Some(&false));
        assert_eq!(decision.limits.get("daily_minutes"), Some(&90));
        assert_eq!(decision.risk, score(0.8).risk);
        assert_eq!(decision.confidence, score(0.8).confidence);
    }

    #[test]
    fn test_score_reasons_not_merged() {
        let decision = decide(&score(0.9), false, &[], &config());
        assert_eq!(decision.action, ActionLevel::Allow);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn test_allow_verdicts_leave_no_reason() {
        let verdicts = [RiskVerdict::allow(), RiskVerdict::allow()];
        let decision = decide(&score(0.2), false, &verdicts, &config());
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn test_bedtime_floor_not_lowering() {
        let verdicts = [RiskVerdict::new(ActionLevel::HardLock, "blocked")];
        let decision = decide(&score(0.2), true, &verdicts, &config());
        assert_eq!(decision.action, ActionLevel::HardLock);
        assert_eq!(decision.reasons, vec![BEDTIME_REASON.to_string(), "blocked".to_string()]);
    }

    #[test]
    fn test_evaluate_inside_wrapped_window() {
        let evaluator = PolicyEvaluator::standard().unwrap();
        let decision = evaluator.evaluate(&score(0.3), None, &config(), at(23, 15));
        assert_eq!(decision.action, ActionLevel::SoftLock);
        assert_eq!(decision.reasons, vec![BEDTIME_REASON.to_string()]);
    }

    #[test]
    fn test_evaluate_outside_window_no_content() {
        let evaluator = PolicyEvaluator::standard().unwrap();
        let decision = evaluator.evaluate(&score(0.3), None, &config(), at(15, 0));
        assert_eq!(decision.action, ActionLevel::Allow);
        assert!(decision.reasons.is_empty());
    }
}
