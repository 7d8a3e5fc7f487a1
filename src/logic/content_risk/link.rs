//! Link Reputation Evaluator
//!
//! Offline reputation checks on a single URL. Script-capable schemes and
//! denylisted hosts are hard locks; destinations that hide where they lead
//! (raw IPs, punycode, shorteners) are soft locks.

use serde::{Deserialize, Serialize};

use super::patterns::{host_matches, parse_url, UrlHost};
use super::types::{non_empty, ContentRisk, EvaluatorError, RiskSignal, RiskVerdict};
use crate::logic::error::EngineResult;
use crate::logic::policy::ActionLevel;

pub const NAME: &str = "link";

const UNSAFE_SCHEMES: [&str; 4] = ["javascript", "data", "vbscript", "file"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub blocked_hosts: Vec<String>,
    pub shorteners: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            blocked_hosts: owned(&["malware.test", "phishing.test", "free-robux.example"]),
            shorteners: owned(&["bit.ly", "tinyurl.com", "t.co", "goo.gl", "ow.ly", "is.gd", "cutt.ly"]),
        }
    }
}

pub struct LinkEvaluator {
    config: LinkConfig,
}

impl LinkEvaluator {
    pub fn new(config: &LinkConfig) -> EngineResult<Self> {
        Ok(Self {
            config: config.clone(),
        })
    }

    fn judge_host(&self, host: &UrlHost) -> RiskVerdict {
        let host = match host {
            UrlHost::Ip(_) => {
                return RiskVerdict::new(ActionLevel::SoftLock, "Link to raw IP address");
            }
            UrlHost::Domain(d) => d.as_str(),
        };

        if self.config.blocked_hosts.iter().any(|d| host_matches(host, d)) {
            return RiskVerdict::new(ActionLevel::HardLock, format!("Link to blocked domain {}", host));
        }
        if host.split('.').any(|label| label.starts_with("xn--")) {
            return RiskVerdict::new(ActionLevel::SoftLock, "Link to lookalike (punycode) domain");
        }
        if self.config.shorteners.iter().any(|d| host_matches(host, d)) {
            return RiskVerdict::new(ActionLevel::SoftLock, "Shortened link hides destination");
        }
        RiskVerdict::allow()
    }
}

impl RiskSignal for LinkEvaluator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn evaluate(&self, input: &ContentRisk) -> Result<RiskVerdict, EvaluatorError> {
        let Some(url) = non_empty(&input.url) else {
            return Ok(RiskVerdict::allow());
        };

        let Some(parts) = parse_url(url) else {
            // nothing a browser could open
            return Ok(RiskVerdict::allow());
        };
        if UNSAFE_SCHEMES.contains(&parts.scheme.as_str()) {
            return Ok(RiskVerdict::new(
                ActionLevel::HardLock,
                format!("Unsafe link scheme {}:", parts.scheme),
            ));
        }

        Ok(match parts.host {
            Some(host) => self.judge_host(&host),
            None => RiskVerdict::allow(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: &str) -> RiskVerdict {
        LinkEvaluator::new(&LinkConfig::default())
            .unwrap()
            .evaluate(&ContentRisk::default().with_url(url))
            .unwrap()
    }

    #[test]
    fn test_ordinary_link() {
        assert_eq!(check("https://www.wikipedia.org/wiki/Rust"), RiskVerdict::allow());
    }

    #[test]
    fn test_script_schemes() {
        assert_eq!(check("javascript:alert(1)").action, ActionLevel::HardLock);
        assert_eq!(check("DATA:text/html;base64,PHNjcmlwdD4=").action, ActionLevel::HardLock);
        assert_eq!(check("javascript:0").action, ActionLevel::HardLock);
    }

    #[test]
    fn test_blocked_host() {
        let verdict = check("http://login.free-robux.example/claim");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Link to blocked domain login.free-robux.example");
    }

    #[test]
    fn test_suspicious_hosts_soft_lock() {
        assert_eq!(check("http://203.0.113.7/download").action, ActionLevel::SoftLock);
        assert_eq!(check("https://xn--pple-43d.com").action, ActionLevel::SoftLock);
        assert_eq!(check("bit.ly/3xYz").action, ActionLevel::SoftLock);
    }

    #[test]
    fn test_obfuscated_blocked_hosts() {
        let verdict = check("http://malware.test\\@example.com/");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Link to blocked domain malware.test");

        let verdict = check("http://malware%2Etest/");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Link to blocked domain malware.test");
    }

    #[test]
    fn test_scheme_split_by_tab() {
        let verdict = check("java\tscript:alert(1)");
        assert_eq!(verdict.action, ActionLevel::HardLock);
        assert_eq!(verdict.rationale, "Unsafe link scheme javascript:");
    }

    #[test]
    fn test_numeric_ip_forms() {
        for url in ["http://0x7f000001/", "http://3405803783/", "http://[::1]/"] {
            let verdict = check(url);
            assert_eq!(verdict.action, ActionLevel::SoftLock, "{}", url);
            assert_eq!(verdict.rationale, "Link to raw IP address");
        }
    }

    #[test]
    fn test_unparseable_link_is_allow() {
        assert_eq!(check("http://[not-an-ip/"), RiskVerdict::allow());
    }
}
