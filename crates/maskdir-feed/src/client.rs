//! HTTP client for the public pharmacy mask-inventory feed.

use std::time::Duration;

use reqwest::Client;

use maskdir_core::record::{FeedDocument, Snapshot};

use crate::error::FeedError;

/// Client for the upstream GeoJSON feed.
///
/// One fetch replaces the whole snapshot, so there is no pagination and no
/// retry policy here: a failed poll is simply retried by the next scheduled
/// poll (the feed refreshes on a fixed cadence anyway).
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the full feed document and returns its `features` as a new
    /// record snapshot.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] — any non-2xx status.
    /// - [`FeedError::Http`] — network, TLS, or timeout failure.
    /// - [`FeedError::Deserialize`] — response body is not the expected
    ///   GeoJSON document.
    pub async fn fetch_snapshot(&self, url: &str) -> Result<Snapshot, FeedError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        // Read the body as text first so a parse failure can carry context
        // about which endpoint produced the garbage.
        let body = response.text().await?;
        let document: FeedDocument =
            serde_json::from_str(&body).map_err(|source| FeedError::Deserialize {
                context: url.to_owned(),
                source,
            })?;

        tracing::debug!(
            url,
            records = document.features.len(),
            "fetched feed snapshot"
        );
        Ok(document.features)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
