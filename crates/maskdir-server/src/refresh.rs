//! Periodic feed polling with an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use maskdir_feed::FeedClient;

use crate::state::AppState;

/// Handle to the background poll loop.
///
/// The timer is released when [`stop`](Refresher::stop) is called or the
/// handle is dropped; a fetch already in flight at that moment runs to
/// completion and its result is discarded with the task.
pub struct Refresher {
    handle: JoinHandle<()>,
}

impl Refresher {
    /// Spawns the poll loop: every `interval` the feed is fetched and the
    /// outcome applied to `state` under a single write guard. A failed
    /// poll logs, flips the feed status to error, and leaves any previous
    /// snapshot in place; the next tick is the retry (no backoff).
    pub fn start(
        client: Arc<FeedClient>,
        feed_url: String,
        interval: Duration,
        state: AppState,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately; the eager startup fetch
            // already covered it.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                refresh_once(&client, &feed_url, &state).await;
            }
        });
        Self { handle }
    }

    /// Stops the poll loop, releasing the timer.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One poll: fetch, then apply either the new snapshot or the error state.
pub async fn refresh_once(client: &FeedClient, feed_url: &str, state: &AppState) {
    match client.fetch_snapshot(feed_url).await {
        Ok(snapshot) => {
            tracing::debug!(records = snapshot.len(), "feed refresh succeeded");
            state.apply_snapshot(snapshot).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "feed refresh failed; serving last snapshot");
            state.apply_fetch_error(e.to_string()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedStatus;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED_BODY: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "id": 1, "name": "甲藥局", "phone": "", "address": "台北市",
                "mask_adult": 10, "mask_child": 5
            },
            "geometry": { "type": "Point", "coordinates": [121.5, 25.0] }
        }]
    }"#;

    #[tokio::test]
    async fn refresh_once_applies_a_successful_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/json"))
            .mount(&server)
            .await;

        let client = FeedClient::new(5, "maskdir-test").expect("client");
        let state = AppState::new();
        refresh_once(&client, &server.uri(), &state).await;

        let directory = state.directory.read().await;
        assert_eq!(directory.status, FeedStatus::Ready);
        assert_eq!(directory.snapshot.len(), 1);
    }

    #[tokio::test]
    async fn refresh_once_failure_sets_error_and_keeps_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/json"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = FeedClient::new(5, "maskdir-test").expect("client");
        let state = AppState::new();
        refresh_once(&client, &server.uri(), &state).await;
        refresh_once(&client, &server.uri(), &state).await;

        let directory = state.directory.read().await;
        assert!(matches!(directory.status, FeedStatus::Error { .. }));
        assert_eq!(directory.snapshot.len(), 1, "stale snapshot survives");
    }

    #[tokio::test]
    async fn stop_releases_the_poll_task() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_BODY, "application/json"))
            .mount(&server)
            .await;

        let client = Arc::new(FeedClient::new(5, "maskdir-test").expect("client"));
        let state = AppState::new();
        let refresher = Refresher::start(
            client,
            server.uri(),
            Duration::from_secs(3600),
            state.clone(),
        );
        refresher.stop();
        // Nothing to assert beyond "stop does not hang or panic"; the
        // aborted task is detached and the timer goes with it.
    }
}
