// Upstream fetch module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::Fetcher;

use std::time::Duration;

/// Which upstream a request goes to. Used for metrics and log labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// FTCScout REST API
    Primary,
    /// The Orange Alliance API
    Secondary,
    /// Public HTML team profile pages
    Page,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Primary => "primary",
            Source::Secondary => "secondary",
            Source::Page => "page",
        }
    }
}

/// Per-call knobs for [`Fetcher::fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub source: Source,
    /// Extra request headers (e.g. API keys).
    pub headers: Vec<(String, String)>,
    /// Overrides the cache's default TTL for this response.
    pub ttl: Option<Duration>,
    /// Skip the cache lookup; a successful response is still stored.
    pub bypass_cache: bool,
}

impl FetchOptions {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            headers: Vec::new(),
            ttl: None,
            bypass_cache: false,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn bypass_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }
}

/// A successful upstream response, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedResponse {
    /// True for `text/html` responses, or bodies that look like a document
    /// when the server didn't say.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(ct) => ct.to_ascii_lowercase().contains("text/html"),
            None => {
                let head: String = self
                    .body
                    .trim_start()
                    .chars()
                    .take(15)
                    .collect::<String>()
                    .to_ascii_lowercase();
                head.starts_with("<!doctype html") || head.starts_with("<html")
            }
        }
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::error::Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
