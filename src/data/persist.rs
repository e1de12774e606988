//! Saving and loading record collections as JSON or CSV.
//!
//! JSON is the lossless format: `read_json(write_json(records)) == records`.
//! CSV is for spreadsheets. It joins attributes with `-` inside their column, so it
//! only round-trips when no attribute contains a hyphen; reading is best-effort and
//! only reliable for files this module wrote.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

use crate::data::course::{CourseRecord, Crn, FIELD_COUNT, Status};
use crate::listing::errors::{Result, ScrapeError};
use crate::listing::json::parse_json_with_context;

/// Joins attributes within their CSV column. Must differ from the field delimiter.
pub const ATTRIBUTE_DELIMITER: char = '-';

const CSV_HEADER: [&str; FIELD_COUNT] = [
    "crn",
    "course_id",
    "attributes",
    "title",
    "instructor",
    "credits",
    "times",
    "projected_enrollment",
    "current_enrollment",
    "seats_available",
    "status",
];

/// On-disk JSON shape. Status is a boolean here and nowhere else.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "_crn")]
    crn: Crn,
    #[serde(rename = "_course_id")]
    course_id: String,
    #[serde(rename = "_attributes")]
    attributes: Vec<String>,
    #[serde(rename = "_title")]
    title: String,
    #[serde(rename = "_instructor")]
    instructor: String,
    #[serde(rename = "_credits")]
    credits: Option<u32>,
    #[serde(rename = "_times")]
    times: String,
    #[serde(rename = "_projected_enrollment")]
    projected_enrollment: u32,
    #[serde(rename = "_current_enrollment")]
    current_enrollment: u32,
    #[serde(rename = "_seats_available")]
    seats_available: i32,
    /// A missing status reads back as closed.
    #[serde(rename = "_status", default)]
    status: bool,
}

impl From<&CourseRecord> for StoredRecord {
    fn from(record: &CourseRecord) -> Self {
        Self {
            crn: record.crn,
            course_id: record.course_id.clone(),
            attributes: record.attributes.clone(),
            title: record.title.clone(),
            instructor: record.instructor.clone(),
            credits: record.credits,
            times: record.times.clone(),
            projected_enrollment: record.projected_enrollment,
            current_enrollment: record.current_enrollment,
            seats_available: record.seats_available,
            status: record.status.is_open(),
        }
    }
}

impl From<StoredRecord> for CourseRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            crn: stored.crn,
            course_id: stored.course_id,
            attributes: stored.attributes,
            title: stored.title,
            instructor: stored.instructor,
            credits: stored.credits,
            times: stored.times,
            projected_enrollment: stored.projected_enrollment,
            current_enrollment: stored.current_enrollment,
            seats_available: stored.seats_available,
            status: Status::from_open(stored.status),
        }
    }
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[CourseRecord], mut writer: W) -> Result<()> {
    let stored: Vec<StoredRecord> = records.iter().map(StoredRecord::from).collect();
    serde_json::to_writer_pretty(&mut writer, &stored).map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_json<R: Read>(mut reader: R) -> Result<Vec<CourseRecord>> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;

    let stored: Vec<StoredRecord> = parse_json_with_context(&body).map_err(ScrapeError::Format)?;
    Ok(stored.into_iter().map(CourseRecord::from).collect())
}

pub fn save_json(records: &[CourseRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_json(records, BufWriter::new(File::create(path)?))?;
    debug!(path = %path.display(), count = records.len(), "saved records as JSON");
    Ok(())
}

pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<CourseRecord>> {
    let path = path.as_ref();
    let records = read_json(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = records.len(), "loaded records from JSON");
    Ok(records)
}

/// Writes a header row and one row per record, columns in record field order.
pub fn write_csv<W: Write>(records: &[CourseRecord], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;

    let delimiter = ATTRIBUTE_DELIMITER.to_string();
    for record in records {
        out.write_record([
            record.crn.to_string(),
            record.course_id.clone(),
            record.attributes.join(&delimiter),
            record.title.clone(),
            record.instructor.clone(),
            record.credits.map(|c| c.to_string()).unwrap_or_default(),
            record.times.clone(),
            record.projected_enrollment.to_string(),
            record.current_enrollment.to_string(),
            record.seats_available.to_string(),
            record.status.to_string(),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Reads rows back through the row normalizer after undoing the attribute join.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let mut input = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in input.records() {
        let row = row?;
        let mut cells: Vec<String> = row.iter().map(unwrap_single_quotes).collect();

        if let Some(attributes) = cells.get_mut(2) {
            *attributes = attributes.split(ATTRIBUTE_DELIMITER).collect::<Vec<_>>().join(",");
        }
        if let Some(status) = cells.get_mut(10) {
            *status = lenient_status(status);
        }

        records.push(CourseRecord::from_raw(&cells)?);
    }

    Ok(records)
}

pub fn save_csv(records: &[CourseRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_csv(records, BufWriter::new(File::create(path)?))?;
    debug!(path = %path.display(), count = records.len(), "saved records as CSV");
    Ok(())
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<CourseRecord>> {
    let path = path.as_ref();
    let records = read_csv(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = records.len(), "loaded records from CSV");
    Ok(records)
}

/// Hand-edited files sometimes wrap a whole cell in single quotes. Only a matched
/// pair is removed; the csv reader has already handled real CSV quoting.
fn unwrap_single_quotes(cell: &str) -> String {
    let trimmed = cell.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(trimmed)
        .to_string()
}

/// Older exports wrote the status as a boolean.
fn lenient_status(cell: &str) -> String {
    match cell.trim() {
        b if b.eq_ignore_ascii_case("true") => Status::Open.to_string(),
        b if b.eq_ignore_ascii_case("false") => Status::Closed.to_string(),
        other => other.to_string(),
    }
}
