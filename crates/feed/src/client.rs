use tracing::{debug, trace};

use crate::error::FeedError;
use crate::protocol::{QuakeFeed, decode};

pub const USGS_ALL_WEEK: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

pub const DEFAULT_MAX_BYTES: usize = 32 * 1024 * 1024;

/// Fetches and decodes one earthquake feed. No caching, retries or timeout:
/// every call is exactly one GET.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
    max_bytes: usize,
}

impl FeedClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    pub fn usgs(http: reqwest::Client) -> Self {
        Self::new(http, USGS_ALL_WEEK)
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn fetch(&self) -> Result<QuakeFeed, FeedError> {
        let url = self.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FeedError::UnsupportedUrl(url.to_string()));
        }

        debug!(%url, "fetching earthquake feed");
        let resp = self.http.get(url).send().await.map_err(FeedError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        if let Some(len) = resp.content_length() {
            if len > self.max_bytes as u64 {
                return Err(FeedError::TooLarge {
                    size: usize::try_from(len).unwrap_or(usize::MAX),
                    max: self.max_bytes,
                });
            }
        }

        let bytes = resp.bytes().await.map_err(FeedError::Request)?;
        if bytes.len() > self.max_bytes {
            return Err(FeedError::TooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }

        trace!(payload = %String::from_utf8_lossy(&bytes), "raw feed payload");

        let feed = decode(&bytes)?;
        debug!(
            features = feed.features.len(),
            skipped = feed.skipped,
            bytes = bytes.len(),
            "decoded earthquake feed"
        );
        Ok(feed)
    }
}
