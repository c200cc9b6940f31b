//! Configuration data structures for ftcbot.
//!
//! This module defines the schema for the application settings: the Discord
//! connection, upstream data sources, caching, retry tuning, the health
//! server and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Discord gateway settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Primary data API and team page settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Secondary (The Orange Alliance) API settings.
    #[serde(default)]
    pub toa: ToaConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Upstream retry tuning.
    #[serde(default)]
    pub retry: RetrySettings,

    /// Liveness HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the Discord connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token. Normally supplied through `DISCORD_TOKEN`.
    #[serde(default, skip_serializing)]
    pub token: Option<Zeroizing<String>>,

    /// Prefix that marks a message as a command.
    /// Default: `!`
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Settings for the primary FTCScout REST API and public team pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    /// Default: `https://api.ftcscout.org/rest/v1`
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Base URL for HTML team profile pages (`<base>/<number>`).
    /// Default: `https://ftcscout.org/teams`
    #[serde(default = "default_team_page_url")]
    pub team_page_url: String,

    /// Per-request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pin the season instead of deriving it from today's date.
    #[serde(default)]
    pub season: Option<i32>,
}

/// Settings for The Orange Alliance API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToaConfig {
    /// API key. Normally supplied through `TOA_KEY`; absent disables TOA.
    #[serde(default, skip_serializing)]
    pub key: Option<Zeroizing<String>>,

    /// Default: `https://theorangealliance.org/api`
    #[serde(default = "default_toa_base_url")]
    pub base_url: String,

    /// Value of the `X-Application-Origin` header.
    /// Default: `ftcbot`
    #[serde(default = "default_application_origin")]
    pub application_origin: String,
}

/// Settings for the response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Time-to-live for cached upstream responses.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

/// Settings for retrying upstream requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts per request, including the first.
    /// Default: `3`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay in milliseconds.
    /// Default: `500`
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Upper bound for a single backoff delay in milliseconds.
    /// Default: `8000`
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

/// Settings for the liveness HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// Overridden by `PORT` when set.
    /// Default: `4000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            prefix: default_prefix(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            team_page_url: default_team_page_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            season: None,
        }
    }
}

impl Default for ToaConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: default_toa_base_url(),
            application_origin: default_application_origin(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enabled: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_api_base_url() -> String {
    "https://api.ftcscout.org/rest/v1".to_string()
}

fn default_team_page_url() -> String {
    "https://ftcscout.org/teams".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ftcbot/{}", env!("CARGO_PKG_VERSION"))
}

fn default_toa_base_url() -> String {
    "https://theorangealliance.org/api".to_string()
}

fn default_application_origin() -> String {
    "ftcbot".to_string()
}

fn default_ttl() -> u64 {
    300
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    8_000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
