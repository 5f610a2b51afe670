use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration shared by the server and CLI binaries.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Upstream feed endpoint returning the GeoJSON pharmacy document.
    pub feed_url: String,
    /// Seconds between scheduled feed polls.
    pub refresh_interval_secs: u64,
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
}
