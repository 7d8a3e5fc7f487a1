//! Policy Configuration
//!
//! Operator-supplied, read-only rule set loaded from YAML at startup.
//! A malformed file is a fatal `ConfigError`, never a per-request error.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveTime;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::logic::content_risk::ContentRiskConfig;
use crate::logic::error::{EngineError, EngineResult};

/// `limits` key that sets the screen-time session limit
pub const SESSION_MINUTES_LIMIT: &str = "session_minutes";

// ============================================================================
// BEDTIME WINDOW
// ============================================================================

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock_time(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid time {:?}, expected HH:MM or HH:MM:SS", raw))
    })
}

fn serialize_time<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M:%S").to_string())
}

/// Daily quiet-hours window with exclusive bounds.
///
/// `start > end` wraps midnight (22:00 → 06:00). `start == end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedtimeWindow {
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub start: NaiveTime,
    #[serde(deserialize_with = "deserialize_time", serialize_with = "serialize_time")]
    pub end: NaiveTime,
}

impl BedtimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse `HH:MM` / `HH:MM:SS` bounds
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        let parse = |raw: &str| {
            parse_clock_time(raw).ok_or_else(|| EngineError::Config(format!("invalid time {:?}", raw)))
        };
        Ok(Self::new(parse(start)?, parse(end)?))
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start < self.end {
            self.start < time && time < self.end
        } else if self.start > self.end {
            time > self.start || time < self.end
        } else {
            false
        }
    }
}

// ============================================================================
// POLICY CONFIG
// ============================================================================

/// Policy configuration (loaded from `policy.yaml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub version: String,
    pub bedtime_window: BedtimeWindow,
    /// Echoed into every decision
    #[serde(default)]
    pub feature_flags: BTreeMap<String, bool>,
    /// Echoed into every decision
    #[serde(default)]
    pub limits: BTreeMap<String, i64>,
    /// Evaluator lexicons and thresholds; omitted keys keep the built-in lists
    #[serde(default)]
    pub content_risk: ContentRiskConfig,
}

impl PolicyConfig {
    pub fn new(version: impl Into<String>, bedtime_window: BedtimeWindow) -> Self {
        Self {
            version: version.into(),
            bedtime_window,
            feature_flags: BTreeMap::new(),
            limits: BTreeMap::new(),
            content_risk: ContentRiskConfig::default(),
        }
    }

    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&content)?;
        log::info!(
            "Loaded policy {} from {} (bedtime {} - {})",
            config.version,
            path.display(),
            config.bedtime_window.start,
            config.bedtime_window.end
        );
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.version.trim().is_empty() {
            return Err(EngineError::Config("policy version must not be empty".to_string()));
        }
        if let Some(&minutes) = self.limits.get(SESSION_MINUTES_LIMIT) {
            if minutes <= 0 {
                return Err(EngineError::Config(format!(
                    "limits.{} must be positive, got {}",
                    SESSION_MINUTES_LIMIT, minutes
                )));
            }
        }
        let limit_secs = self.content_risk.screen_time.limit_secs;
        if !limit_secs.is_finite() || limit_secs <= 0.0 {
            return Err(EngineError::Config(format!(
                "content_risk.screen_time.limit_secs must be positive, got {}",
                limit_secs
            )));
        }
        Ok(())
    }

    /// Evaluator settings for this policy. `limits.session_minutes` wins over
    /// `content_risk.screen_time.limit_secs` when both are set.
    pub fn content_risk_config(&self) -> ContentRiskConfig {
        let mut config = self.content_risk.clone();
        if let Some(&minutes) = self.limits.get(SESSION_MINUTES_LIMIT) {
            config.screen_time.limit_secs = minutes as f64 * 60.0;
        }
        config
    }
}

// ============================================================================
// POLICY STORE
// ============================================================================

/// Holder for the live policy. Readers take an `Arc` snapshot; reloads swap
/// the whole config at once, so in-flight evaluations never see a mix.
#[derive(Debug)]
pub struct PolicyStore {
    current: RwLock<Arc<PolicyConfig>>,
    source: Option<PathBuf>,
}

impl PolicyStore {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
            source: None,
        }
    }

    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let config = PolicyConfig::load(path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
            source: Some(path.to_path_buf()),
        })
    }

    pub fn current(&self) -> Arc<PolicyConfig> {
        Arc::clone(&self.current.read())
    }

    pub fn replace(&self, config: PolicyConfig) -> EngineResult<()> {
        config.validate()?;
        log::info!("Policy swapped to version {}", config.version);
        *self.current.write() = Arc::new(config);
        Ok(())
    }

    /// Re-read the source file. On error the current policy stays in place.
    pub fn reload_from_file(&self) -> EngineResult<Arc<PolicyConfig>> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| EngineError::Config("policy store has no source file".to_string()))?;
        self.replace(PolicyConfig::load(path)?)?;
        Ok(self.current())
    }
}

// ============================================================================
// TESTS
// ============================================================================
