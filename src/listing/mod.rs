//! Access to the public course list: identity, request pacing, transport, and page parsing.

pub mod dom;
pub mod endpoints;
pub mod errors;
pub mod fetcher;
pub mod identity;
pub mod json;
pub mod rate_limit;

pub use endpoints::Endpoints;
pub use errors::{Result, ScrapeError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use identity::Identity;
pub use rate_limit::RateLimiter;
