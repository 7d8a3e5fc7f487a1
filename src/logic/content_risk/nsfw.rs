//! NSFW Evaluator
//!
//! URL-level screen for images: explicit keywords in the URL or an adult host.
//! A pixel classifier can replace this behind the same `RiskSignal` seam.

use serde::{Deserialize, Serialize};

use super::patterns::{host_matches, parse_url, PatternSet, UrlHost};
use super::types::{non_empty, ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use crate::logic::error::EngineResult;
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "nsfw";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NsfwConfig {
    pub explicit_keywords: Vec<String>,
    pub blocked_hosts: Vec<String>,
}

impl Default for NsfwConfig {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            explicit_keywords: owned(&["nsfw", "porn", "xxx", "nude", "nudes", "hentai", "explicit"]),
            blocked_hosts: owned(&["pornhub.com", "xvideos.com", "xhamster.com", "onlyfans.com"]),
        }
    }
}

pub struct NsfwEvaluator {
    keywords: PatternSet,
    blocked_hosts: Vec<String>,
}

impl NsfwEvaluator {
    pub fn new(config: &NsfwConfig) -> EngineResult<Self> {
        Ok(Self {
            keywords: PatternSet::new(&config.explicit_keywords)?,
            blocked_hosts: config.blocked_hosts.clone(),
        })
    }
}

impl RiskSignal for NsfwEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(image_url) = non_empty(&input.image_url) else {
            return Ok(RiskVerdict::allow());
        };

        let host = parse_url(image_url).and_then(|parts| parts.host);
        if let Some(UrlHost::Domain(host)) = host.as_ref() {
            if self.blocked_hosts.iter().any(|d| host_matches(host, d)) {
                return Ok(RiskVerdict::new(
                    ActionLevel::HardLock,
                    format!("Image served from adult host {}", host),
                ));
            }
        }

        if self.keywords.is_match(image_url) {
            return Ok(RiskVerdict::new(ActionLevel::HardLock, "Explicit imagery suspected"));
        }

        Ok(RiskVerdict::allow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: &str) -> RiskVerdict {
        NsfwEvaluator::new(&NsfwConfig::default())
            .unwrap()
            .evaluate(&ContentRisk::default().with_image_url(url))
            .unwrap()
    }

    #[test]
    fn test_clean_image() {
        assert_eq!(check("https://cdn.school.edu/img/class_photo.jpg"), RiskVerdict::allow());
    }

    #[test]
    fn test_keyword_in_path() {
        let verdict = check("https://img.example.com/gallery/NSFW/001.png");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Explicit imagery suspected");
    }

    #[test]
    fn test_blocked_host_and_subdomain() {
        let verdict = check("https://ei.xvideos.com/thumb.jpg");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert!(verdict.rationale.contains("ei.xvideos.com"));
    }

    #[test]
    fn test_blocked_host_behind_backslash() {
        let verdict = check("https://pornhub.com\\@cdn.school.edu/a.jpg");
        assert_eq!(verdict.rationale, "Image served from adult host pornhub.com");
    }

    #[test]
    fn test_empty_is_allow() {
        assert_eq!(check(""), RiskVerdict::allow());
    }
}
