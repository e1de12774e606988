//! Scraper for the William & Mary public course list.
//!
//! [`scraper::CourseScraper`] discovers the latest term and its subjects, then walks
//! subjects one at a time behind a [`listing::RateLimiter`], normalizing each results
//! row into a [`data::CourseRecord`]. Records can be saved and reloaded as JSON or CSV
//! ([`data::persist`]) and searched with [`data::RecordQuery`].

pub mod cli;
pub mod config;
pub mod data;
pub mod listing;
pub mod logging;
pub mod scraper;
pub mod utils;
