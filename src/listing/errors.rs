//! Error types for scraping, normalizing, and persisting course listings.

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Invalid identity string, malformed config value, or no term to scrape.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// An expected dropdown or table element is missing from the page.
    #[error("expected page element not found: {0}")]
    Discovery(String),
    #[error("subject {0:?} is not in the discovered subject list")]
    UnknownSubject(String),
    #[error("course row has {found} fields, expected {expected}")]
    Arity { expected: usize, found: usize },
    #[error("status must be OPEN or CLOSED, got {0:?}")]
    InvalidStatus(String),
    #[error("field `{field}` is not a valid integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    /// Persisted file does not have the expected shape.
    #[error("failed to parse persisted records: {0}")]
    Format(#[source] anyhow::Error),
    /// Network or fetch failure. Never retried.
    #[error("request failed")]
    Transport(#[source] anyhow::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
