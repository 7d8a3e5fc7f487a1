//! Feature Vector - Validated input to all scoring
//!
//! A `FeatureVector` is always complete: every name in `FEATURE_LAYOUT` has a
//! finite value. It is immutable once built and lives for a single request.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, is_layout_compatible, layout_hash, ADULT_TYPICAL, CHILD_TYPICAL,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::logic::error::{EngineError, EngineResult};

// ============================================================================
// SCHEMA MODE
// ============================================================================

/// How unrecognized keys in a raw payload are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Reject the payload
    Strict,
    /// Drop unknown keys
    #[default]
    Lenient,
}

impl FromStr for SchemaMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(SchemaMode::Strict),
            "lenient" => Ok(SchemaMode::Lenient),
            other => Err(EngineError::Config(format!("unknown schema mode: {}", other))),
        }
    }
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredFeatureVector")]
pub struct FeatureVector {
    version: u8,
    layout_hash: u32,
    values: [f32; FEATURE_COUNT],
}

/// Wire form; goes through the same finite check as `from_values`
#[derive(Deserialize)]
struct StoredFeatureVector {
    version: u8,
    layout_hash: u32,
    values: [f32; FEATURE_COUNT],
}

impl TryFrom<StoredFeatureVector> for FeatureVector {
    type Error = EngineError;

    fn try_from(stored: StoredFeatureVector) -> EngineResult<Self> {
        let mut vector = Self::from_values(stored.values)?;
        // a stale stamp is kept so `ordered_row` can refuse it
        vector.version = stored.version;
        vector.layout_hash = stored.layout_hash;
        Ok(vector)
    }
}

impl FeatureVector {
    /// Build from raw values in layout order
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> EngineResult<Self> {
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(EngineError::NonFiniteFeature {
                name: FEATURE_LAYOUT[i].to_string(),
            });
        }

        Ok(Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        })
    }

    /// Build from a name → value map
    pub fn from_map(map: &HashMap<String, f64>, mode: SchemaMode) -> EngineResult<Self> {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), *v)), mode)
    }

    /// Build from name/value pairs. Later duplicates overwrite earlier ones.
    pub fn from_pairs<'a, I>(pairs: I, mode: SchemaMode) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [0.0f32; FEATURE_COUNT];
        let mut seen = [false; FEATURE_COUNT];
        let mut unknown = Vec::new();

        for (name, value) in pairs {
            match feature_index(name) {
                Some(i) => {
                    values[i] = value as f32;
                    seen[i] = true;
                }
                None => unknown.push(name.to_string()),
            }
        }

        if !unknown.is_empty() {
            unknown.sort();
            match mode {
                SchemaMode::Strict => return Err(EngineError::UnknownFeature { names: unknown }),
                SchemaMode::Lenient => log::debug!("Dropping unknown features: {:?}", unknown),
            }
        }

        let missing: Vec<String> = FEATURE_LAYOUT
            .iter()
            .zip(seen.iter())
            .filter(|(_, present)| !**present)
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::FeatureMismatch { missing });
        }

        Self::from_values(values)
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Values in trained column order, or `FeatureMismatch` if this vector was
    /// produced under a different layout
    pub fn ordered_row(&self) -> EngineResult<&[f32; FEATURE_COUNT]> {
        if !is_layout_compatible(self.version, self.layout_hash) {
            return Err(EngineError::FeatureMismatch {
                missing: vec![format!(
                    "layout v{} (hash {:08x}), expected v{} (hash {:08x})",
                    self.version,
                    self.layout_hash,
                    FEATURE_VERSION,
                    layout_hash()
                )],
            });
        }
        Ok(&self.values)
    }

    /// Name → value view for logging and JSON output
    pub fn to_named_map(&self) -> HashMap<String, f32> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Test and tooling helper: start from a typical profile, override by name
pub struct FeatureVectorBuilder {
    values: [f32; FEATURE_COUNT],
}

impl FeatureVectorBuilder {
    /// Start from child-typical means
    pub fn child_typical() -> Self {
        Self { values: CHILD_TYPICAL }
    }

    /// Start from adult-typical means
    pub fn adult_typical() -> Self {
        Self { values: ADULT_TYPICAL }
    }

    /// Set feature by name. Unknown names are ignored.
    pub fn set(mut self, name: &str, value: f32) -> Self {
        if let Some(i) = feature_index(name) {
            self.values[i] = value;
        }
        self
    }

    pub fn typos_per_100(self, value: f32) -> Self {
        self.set("typos_per_100", value)
    }

    pub fn path_erraticness(self, value: f32) -> Self {
        self.set("path_erraticness", value)
    }

    pub fn rtf_ms(self, value: f32) -> Self {
        self.set("rtf_ms", value)
    }

    pub fn build(self) -> EngineResult<FeatureVector> {
        FeatureVector::from_values(self.values)
    }
}

// ============================================================================
// TESTS
// ============================================================================
