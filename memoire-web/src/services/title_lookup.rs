//! Video title lookup client
//!
//! Resolves a hosted-video token to its display title via the host's
//! oEmbed endpoint (no API key required). Titles are trimmed and capped at
//! 100 characters. The base URL is overridable so tests can point the
//! client at a local stub.

use memoire_common::db::models::{truncate_chars, MAX_TITLE_LEN};
use memoire_common::video_link::is_valid_video_id;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
const USER_AGENT: &str = concat!("memoire/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Title lookup errors, mapped to distinct HTTP statuses by the proxy
/// endpoint
#[derive(Debug, Error)]
pub enum TitleError {
    /// Token fails the 11-character shape check; rejected before any call
    #[error("Invalid video id")]
    InvalidId,

    /// Upstream reports not-found or returned no usable title
    #[error("Video not found or title unavailable")]
    NotFound,

    /// Upstream network failure
    #[error("Title service unreachable: {0}")]
    Upstream(String),
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: Option<String>,
}

/// oEmbed title lookup client
#[derive(Debug, Clone)]
pub struct TitleClient {
    http: reqwest::Client,
    base_url: String,
}

impl TitleClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against an alternate endpoint (test stubs)
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a video token to its trimmed, 100-char-capped title
    pub async fn fetch_title(&self, video_id: &str) -> Result<String, TitleError> {
        if !is_valid_video_id(video_id) {
            return Err(TitleError::InvalidId);
        }

        let url = format!(
            "{}/oembed?url=https://www.youtube.com/watch?v={}&format=json",
            self.base_url, video_id
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TitleError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TitleError::NotFound);
        }

        let body: OembedResponse = response
            .json()
            .await
            .map_err(|e| TitleError::Upstream(e.to_string()))?;

        let title = body
            .title
            .map(|t| truncate_chars(t.trim(), MAX_TITLE_LEN))
            .filter(|t| !t.is_empty())
            .ok_or(TitleError::NotFound)?;

        Ok(title)
    }
}

impl Default for TitleClient {
    fn default() -> Self {
        Self::new()
    }
}
