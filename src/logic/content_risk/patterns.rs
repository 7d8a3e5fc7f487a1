//! Pattern helpers shared by the text and URL evaluators

use std::net::IpAddr;

use regex::{Regex, RegexBuilder};
use url::{Host, Url};

use crate::logic::error::{EngineError, EngineResult};

/// Case-insensitive, word-bounded phrase list compiled into one alternation
#[derive(Debug, Clone)]
pub struct PatternSet {
    re: Option<Regex>,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> EngineResult<Self> {
        if patterns.is_empty() {
            return Ok(Self { re: None });
        }

        let alternation = patterns
            .iter()
            .map(|p| format!("(?:{})", p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let re = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()
            .map_err(|e| EngineError::Config(format!("invalid content pattern: {}", e)))?;

        Ok(Self { re: Some(re) })
    }

    /// Number of non-overlapping hits in `text`, repeats included
    pub fn count(&self, text: &str) -> usize {
        self.re.as_ref().map_or(0, |re| re.find_iter(text).count())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(text))
    }
}

// ============================================================================
// URLS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlHost {
    /// Lowercased, IDNA-encoded, trailing dot removed
    Domain(String),
    Ip(IpAddr),
}

/// Scheme and host of a URL as a browser would resolve it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub host: Option<UrlHost>,
}

/// Parse with WHATWG rules (backslashes, tabs, percent-encoded and
/// numeric hosts are normalized the same way a browser does). Bare hosts
/// such as `bit.ly/x` or `localhost:8080/admin` are read as http.
/// `None` when not even the http reading is a valid URL.
pub fn parse_url(raw: &str) -> Option<UrlParts> {
    let raw = raw.trim();

    let url = match Url::parse(raw) {
        Ok(url) if !looks_like_host_port(&url) => url,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", raw)).ok()?
        }
        Err(e) => {
            log::debug!("Unparseable url {:?}: {}", raw, e);
            return None;
        }
    };

    let host = match url.host() {
        Some(Host::Domain(d)) => {
            let d = d.trim_end_matches('.');
            (!d.is_empty()).then(|| UrlHost::Domain(d.to_lowercase()))
        }
        Some(Host::Ipv4(addr)) => Some(UrlHost::Ip(IpAddr::V4(addr))),
        Some(Host::Ipv6(addr)) => Some(UrlHost::Ip(IpAddr::V6(addr))),
        None => None,
    };

    Some(UrlParts {
        scheme: url.scheme().to_string(),
        host,
    })
}

/// `localhost:8080/admin` parses as scheme `localhost` with an opaque path.
/// Only dotted names and `localhost` qualify, so `javascript:1` stays a script.
fn looks_like_host_port(url: &Url) -> bool {
    let scheme = url.scheme();
    (scheme.contains('.') || scheme == "localhost")
        && url.cannot_be_a_base()
        && url.path().starts_with(|c: char| c.is_ascii_digit())
}

/// `host` equals `domain` or is a subdomain of it
pub fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim().trim_start_matches('.').to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}
