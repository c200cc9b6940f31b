//! Structured logging and secret-redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the bot, supporting
//! multiple output formats and providing a helper that keeps the Discord
//! token and API keys out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Discord bot tokens are three base64url segments joined by dots.
static DISCORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_-]{23,28}\.[A-Za-z0-9_-]{6,7}\.[A-Za-z0-9_-]{27,}")
        .expect("token pattern is valid")
});

/// `X-TOA-Key: <value>` as it appears in request dumps.
static TOA_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(x-toa-key\W+)([A-Za-z0-9]+)").expect("header pattern is valid")
});

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`. Serenity's gateway chatter is held at `warn`
/// unless `RUST_LOG` says otherwise.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},serenity=warn,tracing::span=warn", config.level))
    });

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Sanitizes secrets from a string before it is logged.
///
/// Replaces anything shaped like a Discord bot token and the value of an
/// `X-TOA-Key` header with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let result = DISCORD_TOKEN_RE.replace_all(input, "[REDACTED_DISCORD_TOKEN]");
    TOA_KEY_RE
        .replace_all(&result, "${1}[REDACTED_TOA_KEY]")
        .into_owned()
}
