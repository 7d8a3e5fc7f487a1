//! Logistic Predictor
//!
//! Portable pure-Rust ensemble member: standardise, dot with weights, sigmoid.
//! Serialized as JSON next to the manifest.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::{InferenceError, Predictor};
use crate::logic::features::FEATURE_COUNT;

/// Normalization parameters from training (z-score)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

/// Logistic regression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticPredictor {
    #[serde(default = "default_name")]
    pub name: String,
    pub weights: Vec<f32>,
    pub bias: f32,
    #[serde(default)]
    pub standardization: Option<Standardization>,
}

fn default_name() -> String {
    "logistic".to_string()
}

impl LogisticPredictor {
    pub fn new(name: impl Into<String>, weights: Vec<f32>, bias: f32) -> Result<Self, InferenceError> {
        let model = Self {
            name: name.into(),
            weights,
            bias,
            standardization: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_standardization(mut self, mean: Vec<f32>, std: Vec<f32>) -> Result<Self, InferenceError> {
        self.standardization = Some(Standardization { mean, std });
        self.validate()?;
        Ok(self)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let content = fs::read_to_string(path)
            .map_err(|e| InferenceError(format!("Failed to read {}: {}", path.display(), e)))?;
        let model: Self = serde_json::from_str(&content)
            .map_err(|e| InferenceError(format!("Invalid logistic model {}: {}", path.display(), e)))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), InferenceError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(InferenceError(format!(
                "{}: expected {} weights, got {}",
                self.name,
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        if let Some(norm) = &self.standardization {
            if norm.mean.len() != FEATURE_COUNT || norm.std.len() != FEATURE_COUNT {
                return Err(InferenceError(format!(
                    "{}: standardization must have {} entries",
                    self.name, FEATURE_COUNT
                )));
            }
        }
        Ok(())
    }
}

impl Predictor for LogisticPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        let mut z = self.bias as f64;
        for (i, (&x, &w)) in row.iter().zip(self.weights.iter()).enumerate() {
            let x = match &self.standardization {
                Some(norm) => (x - norm.mean[i]) / norm.std[i].max(1e-6),
                None => x,
            };
            z += (x * w) as f64;
        }
        Ok((1.0 / (1.0 + (-z).exp())) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{feature_index, ADULT_TYPICAL, CHILD_TYPICAL};

    fn typos_only() -> LogisticPredictor {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[feature_index("typos_per_100").unwrap()] = 1.0;
        LogisticPredictor::new("typos", weights, -6.0).unwrap()
    }

    #[test]
    fn test_sigmoid_output() {
        let model = typos_only();
        assert!(model.predict(&CHILD_TYPICAL).unwrap() > 0.9);
        assert!(model.predict(&ADULT_TYPICAL).unwrap() < 0.1);
    }

    #[test]
    fn test_wrong_weight_count() {
        assert!(LogisticPredictor::new("bad", vec![1.0; 3], 0.0).is_err());
    }

    #[test]
    fn test_standardization_applied() {
        let model = typos_only()
            .with_standardization(ADULT_TYPICAL.to_vec(), vec![1.0; FEATURE_COUNT])
            .unwrap();
        // Adult mean standardises to zero: sigmoid(-6)
        let p = model.predict(&ADULT_TYPICAL).unwrap();
        assert!((p - 0.002_472_6).abs() < 1e-5);
    }

    #[test]
    fn test_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("member.json");
        let json = serde_json::json!({
            "weights": vec![0.0; FEATURE_COUNT],
            "bias": 0.0
        });
        fs::write(&path, json.to_string()).unwrap();

        let model = LogisticPredictor::load(&path).unwrap();
        assert_eq!(model.name(), "logistic");
        assert!((model.predict(&CHILD_TYPICAL).unwrap() - 0.5).abs() < 1e-6);
    }
}
