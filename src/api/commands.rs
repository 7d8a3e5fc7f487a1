//! Engine Commands - Transport-neutral API
//!
//! Request/response shapes and the functions a transport (HTTP, IPC, CLI)
//! calls. Auth, rate limiting and audit logging belong to the transport.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::logic::content_risk::ContentRisk;
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{layout_hash, LayoutInfo, FEATURE_VERSION};
use crate::logic::policy::{ActionLevel, PolicyConfig, PolicyDecision};
use crate::logic::scoring::ScoreResult;
use crate::logic::DecisionEngine;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Feature name → value
    pub payload: HashMap<String, f64>,
    /// Opaque caller context, logged only
    #[serde(default)]
    pub context: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforceRequest {
    pub payload: HashMap<String, f64>,
    #[serde(default)]
    pub context: Option<HashMap<String, String>>,
    #[serde(default)]
    pub content_risk: Option<ContentRisk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    /// Child likelihood in [0,1]
    pub cls: f32,
    pub confidence: f32,
    pub reasons: Vec<String>,
    pub threshold: f32,
}

impl From<ScoreResult> for DetectResponse {
    fn from(score: ScoreResult) -> Self {
        Self {
            cls: score.risk,
            confidence: score.confidence,
            reasons: score.reasons,
            threshold: score.threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforceResponse {
    pub cls: f32,
    pub confidence: f32,
    /// Policy reasons (bedtime, triggered risk signals)
    pub reasons: Vec<String>,
    pub threshold: f32,
    pub action: ActionLevel,
    pub feature_flags: BTreeMap<String, bool>,
    pub limits: BTreeMap<String, i64>,
    pub policy_version: String,
}

impl EnforceResponse {
    fn from_parts(score: &ScoreResult, decision: PolicyDecision) -> Self {
        Self {
            cls: decision.risk,
            confidence: decision.confidence,
            reasons: decision.reasons,
            threshold: score.threshold,
            action: decision.action,
            feature_flags: decision.feature_flags,
            limits: decision.limits,
            policy_version: decision.policy_version,
        }
    }
}

/// Health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_version: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub member_count: usize,
    pub member_names: Vec<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Error body a transport can return as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// true → caller must fix the request; false → operator problem
    pub client_error: bool,
}

impl From<&EngineError> for ErrorBody {
    fn from(err: &EngineError) -> Self {
        Self {
            error: err.to_string(),
            client_error: err.is_client_error(),
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Score a feature payload
pub fn detect(engine: &DecisionEngine, req: &DetectRequest) -> EngineResult<DetectResponse> {
    if let Some(context) = &req.context {
        log::debug!("detect context: {:?}", context);
    }
    let features = engine.features_from_payload(&req.payload)?;
    Ok(engine.detect(&features)?.into())
}

/// Score a feature payload and apply the policy at `now`
pub fn enforce(
    engine: &DecisionEngine,
    policy: &PolicyConfig,
    req: &EnforceRequest,
    now: NaiveDateTime,
) -> EngineResult<EnforceResponse> {
    if let Some(context) = &req.context {
        log::debug!("enforce context: {:?}", context);
    }
    let features = engine.features_from_payload(&req.payload)?;
    let (score, decision) =
        engine.enforce_with_score(&features, req.content_risk.as_ref(), policy, now)?;
    Ok(EnforceResponse::from_parts(&score, decision))
}

pub fn health(engine: &DecisionEngine) -> HealthStatus {
    let metadata = engine.model_metadata();
    HealthStatus {
        status: "ok".to_string(),
        model_version: metadata.version.clone(),
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
        member_count: metadata.member_count,
        member_names: metadata.member_names.clone(),
        loaded_at: metadata.loaded_at,
    }
}

/// Feature schema the engine expects
pub fn schema() -> LayoutInfo {
    LayoutInfo::current()
}
