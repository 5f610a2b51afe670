mod commands;
mod render;

use std::time::Duration;

use clap::{Parser, Subcommand};

use maskdir_core::Point;
use maskdir_feed::FeedClient;

#[derive(Debug, Parser)]
#[command(name = "maskdir")]
#[command(about = "Pharmacy mask-inventory directory")]
struct Cli {
    /// Feed endpoint; overrides MASKDIR_FEED_URL.
    #[arg(long, global = true)]
    feed_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search and page through the directory.
    List {
        /// Substring matched against pharmacy name or address.
        #[arg(long)]
        search: Option<String>,
        /// Only pharmacies with adult masks in stock.
        #[arg(long)]
        adult: bool,
        /// Only pharmacies with child masks in stock.
        #[arg(long)]
        child: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = maskdir_core::DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Reference latitude; with --lng, sorts the list by distance.
        #[arg(long)]
        lat: Option<f64>,
        /// Reference longitude; with --lat, sorts the list by distance.
        #[arg(long)]
        lng: Option<f64>,
    },
    /// The nearest pharmacies to a point, with distances.
    Nearby {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        #[arg(long, default_value_t = maskdir_core::MARKER_CAP)]
        limit: usize,
    },
    /// Poll the feed and report pharmacies entering or leaving the
    /// nearest-30 set around a point.
    Watch {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        /// Seconds between polls.
        #[arg(long, default_value_t = 180)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = maskdir_core::load_app_config_from_env()?;
    let feed_url = cli.feed_url.unwrap_or(config.feed_url);
    let client = FeedClient::new(config.feed_timeout_secs, &config.feed_user_agent)?;

    match cli.command {
        Commands::List {
            search,
            adult,
            child,
            page,
            page_size,
            lat,
            lng,
        } => {
            let position = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Point { lat, lng }),
                _ => None,
            };
            let options = commands::ListOptions {
                search,
                adult,
                child,
                page,
                page_size,
                position,
            };
            commands::run_list(&client, &feed_url, &options).await
        }
        Commands::Nearby { lat, lng, limit } => {
            commands::run_nearby(&client, &feed_url, Point { lat, lng }, limit).await
        }
        Commands::Watch {
            lat,
            lng,
            interval_secs,
        } => {
            commands::run_watch(
                &client,
                &feed_url,
                Point { lat, lng },
                Duration::from_secs(interval_secs),
            )
            .await
        }
    }
}
