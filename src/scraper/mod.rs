//! Drives discovery and per-subject traversal of the course list.

pub mod session;

pub use session::{CourseScraper, ScrapeState};
