mod api;
mod middleware;
mod refresh;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use maskdir_feed::FeedClient;

use crate::api::build_app;
use crate::refresh::{refresh_once, Refresher};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = maskdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(FeedClient::new(
        config.feed_timeout_secs,
        &config.feed_user_agent,
    )?);
    let state = AppState::new();

    // Eager first fetch so the API can serve immediately; a failure here
    // leaves the state in loading and the poll loop keeps retrying.
    refresh_once(&client, &config.feed_url, &state).await;

    let refresher = Refresher::start(
        Arc::clone(&client),
        config.feed_url.clone(),
        Duration::from_secs(config.refresh_interval_secs),
        state.clone(),
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        feed_url = %config.feed_url,
        refresh_interval_secs = config.refresh_interval_secs,
        "starting maskdir server"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.stop();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
