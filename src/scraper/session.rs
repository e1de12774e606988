//! Sequential, rate-limited traversal of the course list.

use std::path::Path;
use std::time::Instant;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Instrument, debug, info, info_span, warn};

use crate::config::Config;
use crate::data::persist;
use crate::data::{CourseRecord, RecordQuery};
use crate::listing::dom;
use crate::listing::{
    Endpoints, HttpFetcher, Identity, PageFetcher, RateLimiter, Result, ScrapeError,
};
use crate::utils::fmt_duration;

/// Term and subjects discovered from the listing root.
///
/// Only [`CourseScraper::discover`] writes this, and each run replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeState {
    term: Option<String>,
    subjects: Vec<String>,
}

impl ScrapeState {
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }
}

/// Owns discovery state, the rate limiter, and the scraped records.
///
/// Every network-issuing method takes `&mut self`, so one scraper never has two
/// requests in flight. Logging goes to the injected [`Dispatch`], which defaults
/// to a no-op.
pub struct CourseScraper<F = HttpFetcher> {
    fetcher: F,
    endpoints: Endpoints,
    limiter: RateLimiter,
    state: ScrapeState,
    records: Vec<CourseRecord>,
    dispatch: Dispatch,
}

impl CourseScraper<HttpFetcher> {
    /// Builds a scraper against the live course list, validating the identity first.
    pub fn from_config(config: &Config, dispatch: Dispatch) -> Result<Self> {
        let identity = config
            .identity
            .as_deref()
            .ok_or_else(|| ScrapeError::Configuration("identity is required".to_string()))
            .and_then(Identity::parse)?;
        let fetcher = HttpFetcher::new(&identity)?;
        let endpoints = Endpoints::new(&config.base_url)?;
        let limiter = RateLimiter::from_millis(config.rate_limit_ms);

        Ok(Self::new(fetcher, endpoints, limiter).with_dispatch(dispatch))
    }
}

impl<F: PageFetcher> CourseScraper<F> {
    pub fn new(fetcher: F, endpoints: Endpoints, limiter: RateLimiter) -> Self {
        Self {
            fetcher,
            endpoints,
            limiter,
            state: ScrapeState::default(),
            records: Vec::new(),
            dispatch: Dispatch::none(),
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn state(&self) -> &ScrapeState {
        &self.state
    }

    pub fn term(&self) -> Option<&str> {
        self.state.term()
    }

    pub fn subjects(&self) -> &[String] {
        self.state.subjects()
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CourseRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    pub fn query(&self) -> RecordQuery<'_> {
        RecordQuery::new(&self.records)
    }

    /// Fetches the listing root and replaces the known term and subjects.
    pub async fn discover(&mut self) -> Result<&ScrapeState> {
        let dispatch = self.dispatch.clone();
        self.discover_inner().with_subscriber(dispatch).await?;
        Ok(&self.state)
    }

    /// Scrapes one subject, or every discovered subject in order when `subject` is `None`.
    ///
    /// Runs discovery first if no term is known yet. `term` overrides the discovered
    /// term for this call. Returns how many records were appended. On error, records
    /// appended before the failure are kept and the remaining subjects are skipped.
    pub async fn scrape(&mut self, subject: Option<&str>, term: Option<&str>) -> Result<usize> {
        let dispatch = self.dispatch.clone();
        self.scrape_inner(subject, term)
            .with_subscriber(dispatch)
            .await
    }

    async fn discover_inner(&mut self) -> Result<()> {
        self.limiter.wait().await;

        let url = self.endpoints.listing();
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(ScrapeError::Transport)?;
        let found = dom::parse_discovery(&body)?;

        if found.term.is_none() {
            warn!("term dropdown has no selectable term");
        }
        info!(
            term = found.term.as_deref().unwrap_or("none"),
            subjects = found.subjects.len(),
            "discovered terms and subjects"
        );

        self.state = ScrapeState {
            term: found.term,
            subjects: found.subjects,
        };
        Ok(())
    }

    async fn scrape_inner(&mut self, subject: Option<&str>, term: Option<&str>) -> Result<usize> {
        if self.state.term.is_none() {
            debug!("no term known, running discovery first");
            self.discover_inner().await?;
        }

        let term = match term.or(self.state.term.as_deref()) {
            Some(term) => term.to_string(),
            None => return Err(ScrapeError::Configuration("term not set".to_string())),
        };

        if let Some(subject) = subject {
            return self.scrape_subject(&term, subject).await;
        }

        let start = Instant::now();
        let subjects = self.state.subjects.clone();
        let mut total = 0;
        for subject in &subjects {
            total += self.scrape_subject(&term, subject).await?;
        }

        info!(
            term = %term,
            subjects = subjects.len(),
            records = total,
            duration = fmt_duration(start.elapsed()),
            "scraped all subjects"
        );
        Ok(total)
    }

    async fn scrape_subject(&mut self, term: &str, subject: &str) -> Result<usize> {
        if !self.state.subjects.iter().any(|known| known == subject) {
            return Err(ScrapeError::UnknownSubject(subject.to_string()));
        }

        let span = info_span!("scrape_subject", term, subject);
        async move {
            self.limiter.wait().await;

            let start = Instant::now();
            let url = self.endpoints.search(term, subject);
            let body = self
                .fetcher
                .fetch(&url)
                .await
                .map_err(ScrapeError::Transport)?;

            let rows = dom::parse_course_rows(&body)?;
            let before = self.records.len();
            for row in &rows {
                self.records.push(CourseRecord::from_raw(row)?);
            }
            let added = self.records.len() - before;

            info!(
                rows = added,
                duration = fmt_duration(start.elapsed()),
                "scraped subject"
            );
            Ok::<_, ScrapeError>(added)
        }
        .instrument(span)
        .await
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            persist::save_json(&self.records, path)
        })
    }

    /// Replaces the current records with the contents of a JSON file.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records =
            tracing::dispatcher::with_default(&self.dispatch, || persist::load_json(path))?;
        self.records = records;
        Ok(())
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            persist::save_csv(&self.records, path)
        })
    }

    /// Replaces the current records with the contents of a CSV file. Best-effort.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records =
            tracing::dispatcher::with_default(&self.dispatch, || persist::load_csv(path))?;
        self.records = records;
        Ok(())
    }
}
