//! Features Module - Fixed-schema behavioral feature input
//!
//! Feature extraction from raw key/touch events happens upstream; this module
//! only owns the schema and the validated vector built from it.

pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{
    feature_index, feature_name, layout_hash, LayoutInfo, ADULT_TYPICAL, CHILD_TYPICAL,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::{FeatureVector, FeatureVectorBuilder, SchemaMode};
