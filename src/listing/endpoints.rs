//! URLs for the course list's listing root and per-subject search.

use url::Url;

use crate::listing::errors::{Result, ScrapeError};

pub const DEFAULT_BASE_URL: &str = "https://courselist.wm.edu/courselist/";

const SEARCH_PATH: &str = "courseinfo/searchresults";

/// Search filters the traversal leaves unconstrained. `0` means "any".
const UNFILTERED: [(&str, &str); 5] = [
    ("attr", "0"),
    ("attr2", "0"),
    ("levl", "0"),
    ("status", "0"),
    ("ptrm", "0"),
];

#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid")
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        // Url::join drops the last segment unless the base ends in a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| {
            ScrapeError::Configuration(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        Ok(Self { base })
    }

    /// The listing root holding the term and subject dropdowns.
    pub fn listing(&self) -> Url {
        self.base.clone()
    }

    /// Search results for every section of `subject` in `term`.
    pub fn search(&self, term: &str, subject: &str) -> Url {
        let mut url = self
            .base
            .join(SEARCH_PATH)
            .expect("search path is a valid relative URL");
        url.query_pairs_mut()
            .append_pair("term_code", term)
            .append_pair("term_subj", subject)
            .extend_pairs(UNFILTERED)
            .append_pair("search", "Search");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_has_fixed_filters() {
        let url = Endpoints::default().search("202520", "BIOL");
        assert_eq!(
            url.as_str(),
            "https://courselist.wm.edu/courselist/courseinfo/searchresults?term_code=202520&term_subj=BIOL&attr=0&attr2=0&levl=0&status=0&ptrm=0&search=Search"
        );
    }

    #[test]
    fn base_without_trailing_slash_is_normalized() {
        let endpoints = Endpoints::new("http://localhost:8080/courselist").unwrap();
        assert_eq!(endpoints.listing().as_str(), "http://localhost:8080/courselist/");
        assert!(
            endpoints
                .search("1", "CSCI")
                .as_str()
                .starts_with("http://localhost:8080/courselist/courseinfo/searchresults?")
        );
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(ScrapeError::Configuration(_))
        ));
    }
}
