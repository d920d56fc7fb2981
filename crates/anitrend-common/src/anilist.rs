//! AniList GraphQL client
//!
//! This module issues the single trending-anime query the fetch stage relies on
//! and exposes the typed view of its response. The client is deliberately
//! single-shot: no retries, no backoff, and no timeout unless one is configured.

use crate::error::{AnitrendError, Result};
use crate::utils::truncate_string;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Public AniList GraphQL endpoint
pub const DEFAULT_ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

/// Number of trending entries requested per run
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Error bodies longer than this are cut in log output
const MAX_LOGGED_BODY: usize = 500;

/// GraphQL query for the current trending anime page
pub const TRENDING_QUERY: &str = r"
query ($perPage: Int) {
  Page(perPage: $perPage) {
    media(sort: TRENDING_DESC, type: ANIME) {
      title {
        romaji
      }
      averageScore
      popularity
      genres
    }
  }
}
";

/// Configuration for the AniList client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AniListConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Page size of the trending query
    pub per_page: u32,
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for AniListConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ANILIST_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout_secs: None,
        }
    }
}

impl AniListConfig {
    /// Create a configuration for a specific endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Anything that can produce a raw trending payload.
///
/// `Ok(None)` means the source answered but had nothing usable (for example a
/// non-success HTTP status). Transport failures are errors.
#[async_trait]
pub trait TrendingSource: Send + Sync {
    /// Fetch the raw trending payload.
    async fn fetch_trending(&self) -> Result<Option<Value>>;
}

/// AniList API client
#[derive(Debug, Clone)]
pub struct AniListClient {
    client: Client,
    config: AniListConfig,
}

impl AniListClient {
    /// Create a new AniList client with the given configuration
    pub fn new(config: AniListConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| AnitrendError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn request_body(&self) -> Value {
        json!({
            "query": TRENDING_QUERY,
            "variables": { "perPage": self.config.per_page },
        })
    }
}

#[async_trait]
impl TrendingSource for AniListClient {
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint, per_page = self.config.per_page))]
    async fn fetch_trending(&self) -> Result<Option<Value>> {
        info!("Fetching trending anime");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request_body())
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnitrendError::network_with_source("Failed to read response body", e))?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                body = %truncate_string(&body, MAX_LOGGED_BODY),
                "AniList returned an error status"
            );
            return Ok(None);
        }

        debug!(bytes = body.len(), "Received trending payload");
        match serde_json::from_str(&body) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                warn!(error = %e, "AniList response body is not JSON");
                Ok(None)
            }
        }
    }
}

/// Top-level shape of the trending query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    /// GraphQL `data` member
    pub data: TrendingData,
}

/// GraphQL `data` member of the trending response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingData {
    /// The requested page
    #[serde(rename = "Page")]
    pub page: Page,
}

/// One page of media results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Media entries in trending order
    pub media: Vec<Media>,
}

/// A single anime entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Title variants
    pub title: MediaTitle,
    /// Weighted average score (0-100); absent for unscored entries
    pub average_score: Option<u32>,
    /// Number of users with the entry on their list
    pub popularity: Option<u32>,
    /// Genre names in AniList order
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Title variants of a media entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTitle {
    /// Latin-alphabet transliteration
    pub romaji: Option<String>,
}
