//! Location Sharing Evaluator

use super::types::{ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "location";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocationEvaluator;

impl RiskSignal for LocationEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        Ok(match input.sharing {
            Some(true) => RiskVerdict::new(ActionLevel::NotifyGuardian, "Location sharing enabled"),
            _ => RiskVerdict::allow(),
        })
    }
}
