//! Decision Engine
//!
//! The two operations a transport calls: `detect` (score only) and `enforce`
//! (score, then policy). Model set and evaluators are built once and shared
//! read-only; each call is independent and safe to run concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::logic::content_risk::{ContentRisk, RiskSignalSet};
use crate::logic::error::EngineResult;
use crate::logic::features::{FeatureVector, SchemaMode};
use crate::logic::model::{EnsemblePredictor, ModelMetadata};
use crate::logic::policy::{PolicyConfig, PolicyDecision, PolicyEvaluator};
use crate::logic::scoring::{ScoreCombiner, ScoreResult};

#[derive(Debug)]
pub struct DecisionEngine {
    combiner: ScoreCombiner,
    policy: PolicyEvaluator,
    schema_mode: SchemaMode,
}

impl DecisionEngine {
    /// Engine with the standard content-risk evaluators
    pub fn new(ensemble: Arc<EnsemblePredictor>) -> EngineResult<Self> {
        Ok(Self::with_signals(ensemble, RiskSignalSet::standard()?))
    }

    /// Engine whose evaluators follow the policy's `content_risk` section and
    /// session limit. Evaluators are built once; a later policy swap keeps them.
    pub fn for_policy(ensemble: Arc<EnsemblePredictor>, policy: &PolicyConfig) -> EngineResult<Self> {
        let signals = RiskSignalSet::from_config(&policy.content_risk_config())?;
        Ok(Self::with_signals(ensemble, signals))
    }

    pub fn with_signals(ensemble: Arc<EnsemblePredictor>, signals: RiskSignalSet) -> Self {
        let metadata = ensemble.metadata();
        log::info!(
            "Decision engine ready: model {} ({} members), {} risk signals",
            metadata.version,
            metadata.member_count,
            signals.len()
        );

        Self {
            combiner: ScoreCombiner::new(ensemble),
            policy: PolicyEvaluator::new(signals),
            schema_mode: SchemaMode::default(),
        }
    }

    pub fn with_schema_mode(mut self, mode: SchemaMode) -> Self {
        self.schema_mode = mode;
        self
    }

    pub fn schema_mode(&self) -> SchemaMode {
        self.schema_mode
    }

    pub fn model_metadata(&self) -> &ModelMetadata {
        self.combiner.ensemble().metadata()
    }

    /// Validate a raw name → value payload against the feature layout
    pub fn features_from_payload(&self, payload: &HashMap<String, f64>) -> EngineResult<FeatureVector> {
        FeatureVector::from_map(payload, self.schema_mode)
    }

    /// Score only. No policy, no content risk.
    pub fn detect(&self, features: &FeatureVector) -> EngineResult<ScoreResult> {
        self.combiner.combine(features)
    }

    /// Score, then apply bedtime and content-risk escalation.
    ///
    /// The risk score is carried into the decision but does not raise the
    /// action on its own.
    pub fn enforce(
        &self,
        features: &FeatureVector,
        content_risk: Option<&ContentRisk>,
        policy: &PolicyConfig,
        now: NaiveDateTime,
    ) -> EngineResult<PolicyDecision> {
        let score = self.combiner.combine(features)?;
        Ok(self.policy.evaluate(&score, content_risk, policy, now))
    }

    /// `enforce` plus the score itself, for callers that report both
    pub fn enforce_with_score(
        &self,
        features: &FeatureVector,
        content_risk: Option<&ContentRisk>,
        policy: &PolicyConfig,
        now: NaiveDateTime,
    ) -> EngineResult<(ScoreResult, PolicyDecision)> {
        let score = self.combiner.combine(features)?;
        let decision = self.policy.evaluate(&score, content_risk, policy, now);
        Ok((score, decision))
    }
}
