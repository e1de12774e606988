//! Course section records and the normalizer that builds them from raw table cells.
//!
//! Every field is validated at construction, so a `CourseRecord` in hand always has a
//! two-valued status and parsed numbers. There are no mutating setters to re-check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::listing::errors::{Result, ScrapeError};

/// Number of cells in a search results row.
pub const FIELD_COUNT: usize = 11;

/// Course reference number. Displayed zero-padded to five digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crn(u32);

impl Crn {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Crn {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Crn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for Crn {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_int("crn", &clean(s)).map(Self)
    }
}

/// Enrollment status as shown on the course list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == Status::Open
    }

    /// Boolean form used by the JSON files (`true` is open).
    pub fn from_open(open: bool) -> Self {
        if open { Status::Open } else { Status::Closed }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ScrapeError;

    /// Case-sensitive: only the literal `OPEN` and `CLOSED` tokens are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "OPEN" => Ok(Status::Open),
            "CLOSED" => Ok(Status::Closed),
            other => Err(ScrapeError::InvalidStatus(other.to_string())),
        }
    }
}

/// One class section scraped from the course list.
///
/// Serialize-only; files are read back through [`CourseRecord::from_raw`] or the
/// persistence layer, never deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub crn: Crn,
    pub course_id: String,
    pub attributes: Vec<String>,
    pub title: String,
    pub instructor: String,
    /// `None` for variable-credit sections.
    pub credits: Option<u32>,
    pub times: String,
    pub projected_enrollment: u32,
    pub current_enrollment: u32,
    /// Negative when the section is overenrolled.
    pub seats_available: i32,
    pub status: Status,
}

impl CourseRecord {
    /// Builds a record from the raw cell text of one search results row.
    ///
    /// Cells are expected in page order: CRN, course ID, attributes, title,
    /// instructor, credits, times, projected enrollment, current enrollment,
    /// seats available, status.
    pub fn from_raw<S: AsRef<str>>(cells: &[S]) -> Result<Self> {
        let [
            crn,
            course_id,
            attributes,
            title,
            instructor,
            credits,
            times,
            projected,
            current,
            seats,
            status,
        ] = cells
        else {
            return Err(ScrapeError::Arity {
                expected: FIELD_COUNT,
                found: cells.len(),
            });
        };

        Ok(Self {
            crn: crn.as_ref().parse()?,
            course_id: clean(course_id.as_ref()),
            attributes: split_attributes(attributes.as_ref()),
            title: clean(title.as_ref()),
            instructor: clean(instructor.as_ref()),
            credits: parse_credits(credits.as_ref())?,
            times: clean(times.as_ref()),
            projected_enrollment: parse_int("projected_enrollment", &clean(projected.as_ref()))?,
            current_enrollment: parse_int("current_enrollment", &clean(current.as_ref()))?,
            seats_available: parse_seats(seats.as_ref())?,
            status: clean(status.as_ref()).parse()?,
        })
    }
}

/// Drops line breaks and surrounding whitespace.
fn clean(raw: &str) -> String {
    raw.replace(['\r', '\n'], "").trim().to_string()
}

/// Splits a comma-joined attribute cell, dropping empty entries.
fn split_attributes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(clean)
        .filter(|attr| !attr.is_empty())
        .collect()
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| ScrapeError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Seats carry a trailing `*` marker on some rows.
fn parse_seats(raw: &str) -> Result<i32> {
    let value = clean(raw).replace('*', "");
    parse_int("seats_available", value.trim())
}

/// Empty cells and ranges such as `1-4` denote variable credit.
fn parse_credits(raw: &str) -> Result<Option<u32>> {
    let value = clean(raw);
    if value.is_empty() {
        return Ok(None);
    }
    if let Some((low, high)) = value.split_once('-')
        && low.trim().parse::<u32>().is_ok()
        && high.trim().parse::<u32>().is_ok()
    {
        return Ok(None);
    }
    parse_int("credits", &value).map(Some)
}
