use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

/// Default upstream feed — the public pharmacy points dataset.
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/kiang/pharmacies/master/json/points.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid. Every variable
/// has a default, so a bare environment loads successfully.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MASKDIR_ENV", "development"));
    let bind_addr = parse_addr("MASKDIR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MASKDIR_LOG_LEVEL", "info");
    let feed_url = or_default("MASKDIR_FEED_URL", DEFAULT_FEED_URL);
    // The upstream dataset refreshes on a 3-minute cadence.
    let refresh_interval_secs = parse_u64("MASKDIR_REFRESH_INTERVAL_SECS", "180")?;
    let feed_timeout_secs = parse_u64("MASKDIR_FEED_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default("MASKDIR_FEED_USER_AGENT", "maskdir/0.1 (mask-directory)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed_url,
        refresh_interval_secs,
        feed_timeout_secs,
        feed_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
