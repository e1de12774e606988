//! Lookups over a scraped record collection.
//!
//! Everything here is a linear scan; collections are one term's worth of sections.

use crate::data::course::{CourseRecord, Crn, Status};

#[derive(Debug, Clone, Copy)]
pub struct RecordQuery<'a> {
    records: &'a [CourseRecord],
}

impl<'a> RecordQuery<'a> {
    pub fn new(records: &'a [CourseRecord]) -> Self {
        Self { records }
    }

    /// First record with this CRN. Unparseable input matches nothing.
    pub fn find_by_crn(&self, crn: &str) -> Option<&'a CourseRecord> {
        let crn: Crn = crn.parse().ok()?;
        self.records.iter().find(|r| r.crn == crn)
    }

    /// First record with this exact course ID, e.g. `BIOL 204 01`.
    pub fn find_by_course_id(&self, course_id: &str) -> Option<&'a CourseRecord> {
        self.records.iter().find(|r| r.course_id == course_id)
    }

    pub fn with_attribute(&self, attribute: &str) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.attributes.iter().any(|a| a == attribute))
    }

    pub fn by_instructor(&self, instructor: &str) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.instructor == instructor)
    }

    /// `None` selects variable-credit sections.
    pub fn by_credits(&self, credits: Option<u32>) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.credits == credits)
    }

    pub fn by_times(&self, times: &str) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.times == times)
    }

    pub fn by_projected_enrollment(&self, count: u32) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.projected_enrollment == count)
    }

    pub fn by_current_enrollment(&self, count: u32) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.current_enrollment == count)
    }

    pub fn by_seats_available(&self, seats: i32) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.seats_available == seats)
    }

    pub fn by_status(&self, status: Status) -> Vec<&'a CourseRecord> {
        self.filter(|r| r.status == status)
    }

    fn filter(&self, predicate: impl Fn(&CourseRecord) -> bool) -> Vec<&'a CourseRecord> {
        self.records.iter().filter(|&r| predicate(r)).collect()
    }
}
