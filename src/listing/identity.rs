//! Caller identity sent with every request to the course list.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::listing::errors::{Result, ScrapeError};

/// Institutional domain family identities must belong to.
pub const ALLOWED_DOMAIN: &str = "wm.edu";

static IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9-]+\.)?wm\.edu$").expect("valid identity regex")
});

/// A validated `localpart@[subdomain.]wm.edu` address.
///
/// The course list operators ask scrapers to identify themselves, so this is
/// checked once at construction and then sent verbatim as a request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if IDENTITY_RE.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ScrapeError::Configuration(format!(
                "identity {raw:?} must be an email address under {ALLOWED_DOMAIN}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_institutional_addresses() {
        for ok in ["jdoe@wm.edu", "j.doe+scrape@wm.edu", "abc123@email.wm.edu"] {
            assert_eq!(Identity::parse(ok).unwrap().as_str(), ok);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Identity::parse("  jdoe@wm.edu\n").unwrap().as_str(), "jdoe@wm.edu");
    }

    #[test]
    fn rejects_other_domains() {
        for bad in [
            "",
            "jdoe",
            "jdoe@gmail.com",
            "jdoe@notwm.edu",
            "jdoe@a.b.wm.edu",
            "jdoe@wm.edu.evil.com",
            "@wm.edu",
        ] {
            assert!(
                matches!(Identity::parse(bad), Err(ScrapeError::Configuration(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
