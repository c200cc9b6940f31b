// Error types for ftcbot
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Upstream request failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Secondary API unavailable: {0}")]
    Secondary(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Discord error: {0}")]
    Discord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Text shown to the chat user when a command fails.
    ///
    /// Upstream failures never leak status codes or bodies into the channel;
    /// usage errors echo the hint verbatim.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Usage(hint) => format!("Usage: `{}`", hint),
            BotError::UnknownCommand(help) => format!("Unknown command. Type `{}` for a list.", help),
            BotError::NotFound(what) => format!("Couldn't find {}.", what),
            BotError::RetriesExhausted { .. }
            | BotError::Status { .. }
            | BotError::Http(_)
            | BotError::Secondary(_) => {
                "Couldn't fetch data right now, please try again later.".to_string()
            }
            BotError::Json(_) => "Got an unexpected response from the data source.".to_string(),
            _ => "Something went wrong handling that command.".to_string(),
        }
    }

    /// Replace the URL in a `NotFound` with a description of what was asked for.
    pub fn not_found_as(self, what: impl Into<String>) -> Self {
        match self {
            BotError::NotFound(_) => BotError::NotFound(what.into()),
            other => other,
        }
    }

    /// Whether the failure came from an upstream data source.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            BotError::RetriesExhausted { .. }
                | BotError::Status { .. }
                | BotError::Http(_)
                | BotError::Secondary(_)
                | BotError::NotFound(_)
        )
    }
}

impl From<serenity::Error> for BotError {
    fn from(e: serenity::Error) -> Self {
        BotError::Discord(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
