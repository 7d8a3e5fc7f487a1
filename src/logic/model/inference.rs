//! Inference Engine - Ensemble predictor adapter
//!
//! The engine treats the trained model set as an opaque list of predictors.
//! This adapter validates the vector layout, runs each member on the ordered
//! row, and returns the arithmetic mean. No randomness at inference time.

use serde::{Deserialize, Serialize};

use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

impl From<InferenceError> for EngineError {
    fn from(err: InferenceError) -> Self {
        EngineError::Inference(err.0)
    }
}

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// A single trained scorer over the ordered feature row
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;

    /// Probability in [0,1] that the row belongs to a child
    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError>;
}

/// Predictor backed by a plain function, for embedding hand-written scorers
pub struct FnPredictor<F> {
    name: String,
    func: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&[f32; FEATURE_COUNT]) -> f32 + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self { name: name.into(), func }
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&[f32; FEATURE_COUNT]) -> f32 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        Ok((self.func)(row))
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Model metadata for health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub version: String,
    pub member_count: usize,
    pub member_names: Vec<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// ENSEMBLE
// ============================================================================

/// Averaged set of predictors. Read-only once constructed.
pub struct EnsemblePredictor {
    members: Vec<Box<dyn Predictor>>,
    metadata: ModelMetadata,
}

impl EnsemblePredictor {
    /// Fails with `ModelUnavailable` when the member list is empty
    pub fn new(version: impl Into<String>, members: Vec<Box<dyn Predictor>>) -> EngineResult<Self> {
        if members.is_empty() {
            return Err(EngineError::ModelUnavailable(
                "ensemble has no loaded members".to_string(),
            ));
        }

        let metadata = ModelMetadata {
            version: version.into(),
            member_count: members.len(),
            member_names: members.iter().map(|m| m.name().to_string()).collect(),
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "Ensemble {} ready with {} member(s)",
            metadata.version,
            metadata.member_count
        );

        Ok(Self { members, metadata })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Mean member output for a validated feature vector
    pub fn predict(&self, features: &FeatureVector) -> EngineResult<f32> {
        let row = features.ordered_row()?;

        let mut sum = 0.0f64;
        for member in &self.members {
            let p = member.predict(row)?;
            if !p.is_finite() {
                return Err(EngineError::Inference(format!(
                    "{} produced non-finite output",
                    member.name()
                )));
            }
            sum += p.clamp(0.0, 1.0) as f64;
        }

        let mean = (sum / self.members.len() as f64) as f32;
        log::debug!("Ensemble mean over {} member(s): {:.4}", self.members.len(), mean);
        Ok(mean)
    }
}

impl std::fmt::Debug for EnsemblePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsemblePredictor")
            .field("metadata", &self.metadata)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FeatureVectorBuilder;

    fn constant(name: &str, value: f32) -> Box<dyn Predictor> {
        Box::new(FnPredictor::new(name, move |_: &[f32; FEATURE_COUNT]| value))
    }

    struct Failing;

    impl Predictor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _row: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
            Err(InferenceError("session poisoned".to_string()))
        }
    }

    #[test]
    fn test_empty_ensemble_unavailable() {
        let err = EnsemblePredictor::new("v0", vec![]).unwrap_err();
        assert!(matches!(err, EngineError::ModelUnavailable(_)));
    }

    #[test]
    fn test_mean_of_members() {
        let ensemble = EnsemblePredictor::new(
            "v1",
            vec![constant("a", 0.2), constant("b", 0.6), constant("c", 1.0)],
        )
        .unwrap();
        let features = FeatureVectorBuilder::child_typical().build().unwrap();

        let p = ensemble.predict(&features).unwrap();
        assert!((p - 0.6).abs() < 1e-6);
        assert_eq!(ensemble.metadata().member_names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_member_outputs_clamped() {
        let ensemble =
            EnsemblePredictor::new("v1", vec![constant("hi", 3.0), constant("lo", -1.0)]).unwrap();
        let features = FeatureVectorBuilder::adult_typical().build().unwrap();
        assert!((ensemble.predict(&features).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_member_output() {
        let ensemble = EnsemblePredictor::new("v1", vec![constant("nan", f32::NAN)]).unwrap();
        let features = FeatureVectorBuilder::adult_typical().build().unwrap();
        assert!(matches!(ensemble.predict(&features), Err(EngineError::Inference(_))));
    }

    #[test]
    fn test_member_error_propagates() {
        let ensemble = EnsemblePredictor::new("v1", vec![Box::new(Failing)]).unwrap();
        let features = FeatureVectorBuilder::adult_typical().build().unwrap();
        assert_eq!(
            ensemble.predict(&features).unwrap_err(),
            EngineError::Inference("session poisoned".to_string())
        );
    }

    #[test]
    fn test_reads_ordered_row() {
        let ensemble = EnsemblePredictor::new(
            "v1",
            vec![Box::new(FnPredictor::new("first", |row: &[f32; FEATURE_COUNT]| {
                row[0] / 1000.0
            }))],
        )
        .unwrap();
        let features = FeatureVectorBuilder::child_typical().build().unwrap();
        assert!((ensemble.predict(&features).unwrap() - 0.18).abs() < 1e-6);
    }
}
