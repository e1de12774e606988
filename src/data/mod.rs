//! Course records, their persisted forms, and queries over them.

pub mod course;
pub mod persist;
pub mod query;

pub use course::{CourseRecord, Crn, Status};
pub use query::RecordQuery;
