//! Feature Schema
//!
//! Column order the ensemble members were trained on. The heuristic reads
//! features by name; the ensemble reads them by position, so reordering,
//! adding or removing a name requires a `FEATURE_VERSION` bump and retrained
//! models (the model manifest records the version it was built for).

use serde::{Deserialize, Serialize};

pub const FEATURE_VERSION: u8 = 1;

pub const FEATURE_COUNT: usize = 17;

// ============================================================================
// COLUMNS
// ============================================================================

pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    // typing cadence
    "iki_mean",         // inter-key interval, ms
    "iki_std",
    "typos_per_100",    // corrected typos per 100 keystrokes
    "backspace_rate",
    "avg_word_len",
    "short_word_ratio", // words of <= 3 chars
    // touch
    "swipe_speed_mean", // px/s
    "swipe_speed_std",
    "press_ms_mean",
    "press_ms_std",
    "path_erraticness", // 0..1
    // language
    "emoji_ratio",
    "punct_ratio",
    "vocab_simplicity",
    "readability_fk",   // Flesch-Kincaid grade
    // timing
    "rtf_ms",           // time to first input
    "dwell_std_ms",
];

/// Population means for children, layout order
pub const CHILD_TYPICAL: [f32; FEATURE_COUNT] = [
    180.0, 95.0, 9.0, 0.22, 3.8, 0.75,
    1200.0, 550.0, 140.0, 60.0, 0.65,
    0.36, 0.25, 0.78, 2.5,
    900.0, 420.0,
];

/// Population means for adults, layout order
pub const ADULT_TYPICAL: [f32; FEATURE_COUNT] = [
    130.0, 55.0, 3.0, 0.14, 5.2, 0.25,
    800.0, 240.0, 90.0, 30.0, 0.32,
    0.14, 0.54, 0.52, 7.8,
    350.0, 180.0,
];

// ============================================================================
// FINGERPRINT
// ============================================================================

/// CRC32 over the version byte and the newline-joined column names
pub fn layout_hash() -> u32 {
    let mut bytes = vec![FEATURE_VERSION];
    bytes.extend_from_slice(FEATURE_LAYOUT.join("\n").as_bytes());
    crc32fast::hash(&bytes)
}

/// A vector stamped with `version`/`hash` can be fed to the current models
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

/// Schema description returned by the `schema` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        LayoutInfo {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique() {
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_eq!(feature_index(name), Some(i), "duplicate column {}", name);
        }
    }

    #[test]
    fn test_hash_stable_and_versioned() {
        assert_eq!(layout_hash(), layout_hash());
        assert!(is_layout_compatible(FEATURE_VERSION, layout_hash()));
        assert!(!is_layout_compatible(FEATURE_VERSION + 1, layout_hash()));
        assert!(!is_layout_compatible(FEATURE_VERSION, layout_hash() ^ 1));
    }

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(feature_index("iki_mean"), Some(0));
        assert_eq!(feature_index("path_erraticness"), Some(10));
        assert_eq!(feature_index("cpu_percent"), None);
        assert_eq!(feature_name(16), Some("dwell_std_ms"));
        assert_eq!(feature_name(FEATURE_COUNT), None);
    }

    #[test]
    fn test_typical_profiles_differ_everywhere() {
        for (i, (c, a)) in CHILD_TYPICAL.iter().zip(ADULT_TYPICAL.iter()).enumerate() {
            assert_ne!(c, a, "{} has identical child/adult means", FEATURE_LAYOUT[i]);
        }
    }

    #[test]
    fn test_layout_info_current() {
        let info = LayoutInfo::current();
        assert_eq!(info.hash, layout_hash());
        assert_eq!(info.feature_names[15], "rtf_ms");
        assert_eq!(info.feature_count, info.feature_names.len());
    }
}
