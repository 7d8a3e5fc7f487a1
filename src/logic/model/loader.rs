//! Model Loader - Manifest-driven ensemble loading
//!
//! A model directory holds `manifest.json` plus one file per member. Loading
//! happens once at startup; any failure is `ModelUnavailable` and the process
//! must not serve traffic.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::inference::{EnsemblePredictor, InferenceError, Predictor};
use super::logistic::LogisticPredictor;
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::FEATURE_VERSION;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

// ============================================================================
// MANIFEST
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Onnx,
    Logistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEntry {
    pub kind: MemberKind,
    /// Relative to the model directory
    pub path: PathBuf,
    /// Hex-encoded SHA-256 of the member file
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: String,
    pub feature_version: u8,
    pub members: Vec<MemberEntry>,
}

impl ModelManifest {
    pub fn load(model_dir: &Path) -> EngineResult<Self> {
        let path = model_dir.join(MANIFEST_FILE_NAME);
        let content = fs::read_to_string(&path).map_err(|e| {
            EngineError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            EngineError::ModelUnavailable(format!("invalid manifest {}: {}", path.display(), e))
        })
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load every manifest member and assemble the ensemble
pub fn load_ensemble(model_dir: &Path) -> EngineResult<EnsemblePredictor> {
    log::info!("Loading ensemble from {}", model_dir.display());

    let manifest = ModelManifest::load(model_dir)?;

    if manifest.feature_version != FEATURE_VERSION {
        return Err(EngineError::ModelUnavailable(format!(
            "model trained on feature layout v{}, runtime is v{}",
            manifest.feature_version, FEATURE_VERSION
        )));
    }

    let mut members: Vec<Box<dyn Predictor>> = Vec::with_capacity(manifest.members.len());
    for entry in &manifest.members {
        let path = model_dir.join(&entry.path);

        if let Some(expected) = &entry.sha256 {
            verify_checksum(&path, expected)?;
        }

        let member = load_member(entry.kind, &path)
            .map_err(|e| EngineError::ModelUnavailable(e.0))?;
        log::info!("Loaded {:?} member {}", entry.kind, member.name());
        members.push(member);
    }

    EnsemblePredictor::new(manifest.version, members)
}

fn load_member(kind: MemberKind, path: &Path) -> Result<Box<dyn Predictor>, InferenceError> {
    match kind {
        MemberKind::Logistic => Ok(Box::new(LogisticPredictor::load(path)?)),
        #[cfg(feature = "onnx")]
        MemberKind::Onnx => Ok(Box::new(super::onnx::OnnxPredictor::load(path)?)),
        #[cfg(not(feature = "onnx"))]
        MemberKind::Onnx => Err(InferenceError(format!(
            "{}: built without the `onnx` feature",
            path.display()
        ))),
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Compute SHA256 hash of file
pub fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

fn verify_checksum(path: &Path, expected: &str) -> EngineResult<()> {
    let actual = compute_file_hash(path).map_err(|e| {
        EngineError::ModelUnavailable(format!("cannot hash {}: {}", path.display(), e))
    })?;

    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(EngineError::ModelUnavailable(format!(
            "checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            actual
        )));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
