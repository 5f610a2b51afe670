//! Domain core for the pharmacy mask-inventory directory: feed record
//! types, great-circle distance, the filter/paginate pipeline, proximity
//! ordering, the capped map-marker set, and process configuration.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod geo;
pub mod markers;
pub mod pipeline;
pub mod position;
pub mod record;
pub mod sort;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError, DEFAULT_FEED_URL};
pub use filter::FilterCondition;
pub use geo::{haversine_km, Point};
pub use markers::{MarkerDiff, MarkerSet, MARKER_CAP};
pub use pipeline::{
    filter_indices, paginate, total_pages, DirectoryState, DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES,
};
pub use position::{FixedPosition, NoPosition, PositionError, PositionProvider};
pub use record::{FeedDocument, Geometry, Pharmacy, PharmacyProps, Snapshot};
pub use sort::sort_indices_by_distance;
