//! Model Module - Ensemble predictor adapter
//!
//! The engine only needs `predict(features) -> [0,1]`. Training, export and
//! versioning of the member models happen elsewhere.

pub mod inference;
pub mod loader;
pub mod logistic;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use inference::{EnsemblePredictor, FnPredictor, InferenceError, ModelMetadata, Predictor};
pub use loader::{load_ensemble, ModelManifest};
pub use logistic::LogisticPredictor;
#[cfg(feature = "onnx")]
pub use onnx::OnnxPredictor;
