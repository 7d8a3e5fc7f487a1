//! ONNX Predictor - ONNX Runtime Integration
//!
//! Runs one exported ensemble member (e.g. a converted gradient-boosted tree)
//! on a `[1, FEATURE_COUNT]` f32 row.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{InferenceError, Predictor};
use crate::logic::features::FEATURE_COUNT;

/// One ONNX session. `Session::run` needs exclusive access, so calls on the
/// same member are serialized.
pub struct OnnxPredictor {
    name: String,
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxPredictor {
    /// Load ONNX model from file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", path.display());

        if !path.exists() {
            return Err(InferenceError(format!("Model not found: {}", path.display())));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .with_intra_threads(1)
            .map_err(|e| InferenceError(format!("Failed to set threads: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        Self::from_session(path.display().to_string(), session)
    }

    fn from_session(name: String, session: Session) -> Result<Self, InferenceError> {
        // Classifier exports list the label first and probabilities last
        let output_name = session
            .outputs
            .last()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        Ok(Self {
            name,
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Predictor for OnnxPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row.to_vec())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        // [p_adult, p_child] for two-class exports, [p_child] otherwise
        let probability = match data.len() {
            0 => return Err(InferenceError("Empty output tensor".to_string())),
            1 => data[0],
            _ => data[1],
        };

        Ok(probability)
    }
}
