//! Score Combiner
//!
//! `risk = 0.35 * heuristic + 0.65 * ensemble`. The blend is a fixed policy
//! constant (see `rules`), not a learned weight.

use std::sync::Arc;

use super::heuristic::{attribute, heuristic_score};
use super::rules::{ENSEMBLE_WEIGHT, HEURISTIC_WEIGHT};
use super::types::{ScoreBreakdown, ScoreResult};
use crate::logic::error::EngineResult;
use crate::logic::features::FeatureVector;
use crate::logic::model::EnsemblePredictor;

#[derive(Debug, Clone)]
pub struct ScoreCombiner {
    ensemble: Arc<EnsemblePredictor>,
}

impl ScoreCombiner {
    pub fn new(ensemble: Arc<EnsemblePredictor>) -> Self {
        Self { ensemble }
    }

    pub fn ensemble(&self) -> &EnsemblePredictor {
        &self.ensemble
    }

    pub fn combine(&self, features: &FeatureVector) -> EngineResult<ScoreResult> {
        let heuristic = heuristic_score(features);
        let ensemble = self.ensemble.predict(features)?;

        let breakdown = ScoreBreakdown {
            heuristic,
            ensemble,
            heuristic_contribution: heuristic * HEURISTIC_WEIGHT,
            ensemble_contribution: ensemble * ENSEMBLE_WEIGHT,
        };
        let risk = breakdown.heuristic_contribution + breakdown.ensemble_contribution;

        log::debug!(
            "Combined risk {:.4} (heuristic {:.4}, ensemble {:.4})",
            risk,
            heuristic,
            ensemble
        );

        Ok(ScoreResult::new(risk, attribute(features), breakdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{FeatureVectorBuilder, FEATURE_COUNT};
    use crate::logic::model::{FnPredictor, Predictor};

    fn combiner_with(value: f32) -> ScoreCombiner {
        let member: Box<dyn Predictor> =
            Box::new(FnPredictor::new("fixed", move |_: &[f32; FEATURE_COUNT]| value));
        ScoreCombiner::new(Arc::new(EnsemblePredictor::new("test", vec![member]).unwrap()))
    }

    #[test]
    fn test_blend_weights() {
        let features = FeatureVectorBuilder::adult_typical().build().unwrap();
        let result = combiner_with(1.0).combine(&features).unwrap();

        let expected = 0.35 * result.breakdown.heuristic + 0.65;
        assert!((result.risk - expected).abs() < 1e-6);
        assert!((result.breakdown.ensemble_contribution - 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_saturated_child_dominated_by_ensemble() {
        let features = FeatureVectorBuilder::child_typical()
            .typos_per_100(15.0)
            .set("short_word_ratio", 0.8)
            .path_erraticness(0.9)
            .set("emoji_ratio", 0.5)
            .set("iki_mean", 260.0)
            .set("swipe_speed_mean", 1700.0)
            .rtf_ms(1500.0)
            .build()
            .unwrap();

        let low = combiner_with(0.0).combine(&features).unwrap();
        let high = combiner_with(1.0).combine(&features).unwrap();

        assert!((low.breakdown.heuristic - 1.0).abs() < 1e-4);
        assert!((low.risk - 0.35).abs() < 1e-4);
        assert!((high.risk - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_combine_deterministic() {
        let combiner = combiner_with(0.42);
        let features = FeatureVectorBuilder::child_typical().build().unwrap();

        let first = combiner.combine(&features).unwrap();
        for _ in 0..10 {
            let again = combiner.combine(&features).unwrap();
            assert_eq!(again.risk.to_bits(), first.risk.to_bits());
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_confidence_follows_risk() {
        let features = FeatureVectorBuilder::adult_typical().build().unwrap();
        let result = combiner_with(0.3).combine(&features).unwrap();
        let expected = 1.0 - (result.risk - 0.5).powi(2);
        assert!((result.confidence - expected).abs() < 1e-6);
    }
}
