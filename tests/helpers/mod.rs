//! Shared fixtures: a scripted page fetcher and HTML page builders.

#![allow(dead_code)]

use async_trait::async_trait;
use courselist::listing::{Endpoints, PageFetcher, RateLimiter};
use courselist::scraper::CourseScraper;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use url::Url;

pub const INTERVAL: Duration = Duration::from_millis(500);

const LISTING_KEY: &str = "<listing>";

#[derive(Default)]
struct Script {
    pages: HashMap<String, Result<String, String>>,
    log: Vec<(Url, Instant)>,
}

/// Serves canned pages keyed by subject code (or the listing root) and records
/// every URL it was asked for, with the time of the request.
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<Script>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing(self, body: impl Into<String>) -> Self {
        self.set(LISTING_KEY, Ok(body.into()))
    }

    pub fn subject(self, code: &str, body: impl Into<String>) -> Self {
        self.set(code, Ok(body.into()))
    }

    pub fn failing(self, code: &str, message: &str) -> Self {
        self.set(code, Err(message.to_string()))
    }

    fn set(self, key: &str, page: Result<String, String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .pages
            .insert(key.to_string(), page);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.script
            .lock()
            .unwrap()
            .log
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        self.script
            .lock()
            .unwrap()
            .log
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }

    /// Subject codes of the search requests, in request order.
    pub fn searched_subjects(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|url| query_param(url, "term_subj"))
            .collect()
    }
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> anyhow::Result<String> {
        let mut script = self.script.lock().unwrap();
        script.log.push((url.clone(), Instant::now()));

        let key = query_param(url, "term_subj").unwrap_or_else(|| LISTING_KEY.to_string());
        match script.pages.get(&key) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{message}")),
            None => Err(anyhow::anyhow!("no page scripted for {url}")),
        }
    }
}

pub fn scraper(fetcher: &ScriptedFetcher) -> CourseScraper<ScriptedFetcher> {
    CourseScraper::new(fetcher.clone(), Endpoints::default(), RateLimiter::new(INTERVAL))
}

/// Listing root with the given term options (a sentinel is appended) and subject
/// options (a placeholder is prepended).
pub fn listing_page(terms: &[&str], subjects: &[&str]) -> String {
    let terms: String = terms
        .iter()
        .map(|t| format!(r#"<option value="{t}">Term {t}</option>"#))
        .collect();
    let subjects: String = subjects
        .iter()
        .map(|s| format!(r#"<option value="{s}">{s}</option>"#))
        .collect();

    format!(
        r#"<html><body><form>
        <select id="term_code">{terms}<option value="">-- select --</option></select>
        <select id="term_subj"><option value="0">All Subjects</option>{subjects}</select>
        </form></body></html>"#
    )
}

/// Search results table with a header row followed by `rows`.
pub fn results_page(rows: &[[&str; 11]]) -> String {
    let body: String = rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{tds}</tr>\n")
        })
        .collect();

    format!(
        r#"<html><body><table>
        <tr><th>CRN</th><th>COURSE ID</th><th>ATTR</th><th>TITLE</th><th>INSTR</th>
            <th>CRDT</th><th>TIMES</th><th>PROJ</th><th>CURR</th><th>SEATS</th><th>STATUS</th></tr>
        {body}
        </table></body></html>"#
    )
}

pub fn row<'a>(crn: &'a str, course_id: &'a str, status: &'a str) -> [&'a str; 11] {
    [
        crn,
        course_id,
        "NQR, C200",
        "Some Course",
        "Staff",
        "3",
        "MWF:1000-1050",
        "25",
        "20",
        "5*\n",
        status,
    ]
}

/// One event seen by a [`CapturedEvents`] layer.
#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub fields: HashMap<String, String>,
}

/// Collects every event it sees so tests can assert on where logs were routed.
#[derive(Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CapturedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    pub fn with_message(&self, message: &str) -> Vec<Captured> {
        self.events()
            .into_iter()
            .filter(|event| event.message == message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldMap::default();
        event.record(&mut fields);
        let message = fields.0.remove("message").unwrap_or_default();

        self.events.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message,
            fields: fields.0,
        });
    }
}

#[derive(Default)]
struct FieldMap(HashMap<String, String>);

impl Visit for FieldMap {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}
