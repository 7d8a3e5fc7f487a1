//! Startup wiring
//!
//! Loads the policy and the model set once, before any command is served.
//! The policy is read first so a broken `policy.yaml` fails every command,
//! including the ones that never consult it.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::commands::{self, EnforceRequest, EnforceResponse};
use crate::logic::error::EngineResult;
use crate::logic::features::SchemaMode;
use crate::logic::model::load_ensemble;
use crate::logic::policy::PolicyStore;
use crate::logic::DecisionEngine;

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub model_dir: PathBuf,
    pub policy_path: PathBuf,
    pub schema_mode: SchemaMode,
}

#[derive(Debug)]
pub struct Runtime {
    engine: DecisionEngine,
    policy: PolicyStore,
}

impl Runtime {
    pub fn load(options: &RuntimeOptions) -> EngineResult<Self> {
        let policy = PolicyStore::from_file(&options.policy_path)?;
        let ensemble = load_ensemble(&options.model_dir)?;
        let engine = DecisionEngine::for_policy(Arc::new(ensemble), &policy.current())?
            .with_schema_mode(options.schema_mode);

        Ok(Self { engine, policy })
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn policy(&self) -> &PolicyStore {
        &self.policy
    }

    /// `enforce` against the current policy snapshot
    pub fn enforce(&self, req: &EnforceRequest, now: NaiveDateTime) -> EngineResult<EnforceResponse> {
        commands::enforce(&self.engine, &self.policy.current(), req, now)
    }
}
