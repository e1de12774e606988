//! Page transport. The orchestrator only needs "GET this URL, give me the body".

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Instant;
use tracing::debug;
use url::Url;

use crate::listing::errors::{Result, ScrapeError};
use crate::listing::identity::Identity;
use crate::utils::warn_if_slow_fetch;

/// Retrieves raw page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> anyhow::Result<String>;
}

/// [`PageFetcher`] over `reqwest`, identifying the caller on every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(identity: &Identity) -> Result<Self> {
        let value = HeaderValue::from_str(identity.as_str()).map_err(|e| {
            ScrapeError::Configuration(format!("identity is not a valid header value: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, value.clone());
        headers.insert(header::FROM, value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ScrapeError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> anyhow::Result<String> {
        let start = Instant::now();
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.context("failed to read response body")?;

        debug!(url = %url, status, bytes = body.len(), "fetched page");
        warn_if_slow_fetch(url, start.elapsed());
        Ok(body)
    }
}
