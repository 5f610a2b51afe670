pub mod client;
pub mod error;

pub use client::FeedClient;
pub use error::FeedError;
