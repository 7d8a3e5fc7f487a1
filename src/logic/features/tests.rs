//! Integration Tests for the feature schema
//!
//! A vector built from the full recognized feature set must flow through both
//! scorers without a schema error.

#[cfg(test)]
mod integration_tests {
    use std::collections::HashMap;

    use crate::logic::error::EngineError;
    use crate::logic::features::{
        FeatureVector, SchemaMode, CHILD_TYPICAL, FEATURE_COUNT, FEATURE_LAYOUT,
    };
    use crate::logic::model::{EnsemblePredictor, FnPredictor, LogisticPredictor, Predictor};
    use crate::logic::scoring::heuristic_score;

    fn full_payload() -> HashMap<String, f64> {
        FEATURE_LAYOUT
            .iter()
            .zip(CHILD_TYPICAL.iter())
            .map(|(name, value)| (name.to_string(), *value as f64))
            .collect()
    }

    fn ensemble() -> EnsemblePredictor {
        let members: Vec<Box<dyn Predictor>> = vec![
            Box::new(FnPredictor::new("constant", |_: &[f32; FEATURE_COUNT]| 0.5)),
            Box::new(LogisticPredictor::new("zero", vec![0.0; FEATURE_COUNT], 0.0).unwrap()),
        ];
        EnsemblePredictor::new("test", members).unwrap()
    }

    #[test]
    fn test_full_feature_set_accepted_by_both_scorers() {
        let vector = FeatureVector::from_map(&full_payload(), SchemaMode::Strict).unwrap();

        let heuristic = heuristic_score(&vector);
        assert!((0.0..=1.0).contains(&heuristic));

        let ensemble = ensemble().predict(&vector).unwrap();
        assert!((ensemble - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_named_map_round_trip() {
        let vector = FeatureVector::from_map(&full_payload(), SchemaMode::Strict).unwrap();
        let named: HashMap<String, f64> = vector
            .to_named_map()
            .into_iter()
            .map(|(k, v)| (k, v as f64))
            .collect();

        let again = FeatureVector::from_map(&named, SchemaMode::Strict).unwrap();
        assert_eq!(again, vector);
    }

    #[test]
    fn test_missing_column_reported_by_name() {
        let mut payload = full_payload();
        payload.remove("rtf_ms");
        payload.remove("iki_mean");

        match FeatureVector::from_map(&payload, SchemaMode::Lenient) {
            Err(EngineError::FeatureMismatch { missing }) => {
                assert_eq!(missing, vec!["iki_mean".to_string(), "rtf_ms".to_string()]);
            }
            other => panic!("expected FeatureMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_column_by_mode() {
        let mut payload = full_payload();
        payload.insert("device_model".to_string(), 3.0);

        assert!(FeatureVector::from_map(&payload, SchemaMode::Lenient).is_ok());
        assert!(matches!(
            FeatureVector::from_map(&payload, SchemaMode::Strict),
            Err(EngineError::UnknownFeature { .. })
        ));
    }
}
