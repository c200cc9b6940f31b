// HTTP fetcher with retry and response caching
// Author: kelexine (https://github.com/kelexine)

use super::{FetchOptions, FetchedResponse};
use crate::cache::TtlCache;
use crate::config::ApiConfig;
use crate::error::{BotError, Result};
use crate::metrics;
use crate::utils::retry::{parse_retry_after, with_retry, AttemptError, RetryError, RetryPolicy};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// GET-only HTTP client shared by every upstream source.
///
/// Owns the retry policy and an injected response cache:
/// - Cache hits return without touching the network
/// - Misses go through [`with_retry`]; only 2xx responses are cached
#[derive(Clone)]
pub struct Fetcher {
    http_client: Client,
    cache: Arc<TtlCache<FetchedResponse>>,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher with a pooled HTTP client configured from `config`.
    pub fn new(
        config: &ApiConfig,
        cache: Arc<TtlCache<FetchedResponse>>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.as_str())
            .use_rustls_tls()
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling");

        Ok(Self::with_client(http_client, cache, policy))
    }

    pub fn with_client(
        http_client: Client,
        cache: Arc<TtlCache<FetchedResponse>>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            http_client,
            cache,
            policy,
        }
    }

    pub fn cache(&self) -> &Arc<TtlCache<FetchedResponse>> {
        &self.cache
    }

    /// GET `url`, consulting the cache first.
    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchedResponse> {
        if !options.bypass_cache {
            if let Some(cached) = self.cache.get(url) {
                return Ok(cached);
            }
        }

        let source = options.source.as_str();
        let started = Instant::now();
        let label = format!("GET {} ({})", url, source);

        let result = with_retry(&label, &self.policy, |attempt| {
            let mut request = self.http_client.get(url);
            for (name, value) in &options.headers {
                request = request.header(name.as_str(), value.as_str());
            }
            debug!("{} attempt {}", label, attempt);

            async move {
                let response = request.send().await.map_err(|e| {
                    metrics::record_upstream_attempt(source, None);
                    AttemptError::transport(format!("HTTP error: {}", e))
                })?;

                let status = response.status().as_u16();
                metrics::record_upstream_attempt(source, Some(status));

                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| parse_retry_after(v, chrono::Utc::now()));
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);

                let body = response
                    .text()
                    .await
                    .map_err(|e| AttemptError::transport(format!("Body read error: {}", e)))?;

                if !(200..300).contains(&status) {
                    return Err(AttemptError::status(status, retry_after, truncate(&body)));
                }

                Ok(FetchedResponse {
                    status,
                    content_type,
                    body,
                })
            }
        })
        .await;

        metrics::record_upstream_fetch(source, result.is_ok(), started.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                let ttl = options.ttl.unwrap_or_else(|| self.cache.default_ttl());
                self.cache.set(url, response.clone(), ttl);
                Ok(response)
            }
            Err(RetryError::Fatal(error)) => match error.status {
                Some(404) => Err(BotError::NotFound(url.to_string())),
                Some(status) => {
                    warn!("{} failed with HTTP {}", label, status);
                    Err(BotError::Status {
                        status,
                        body: error.message,
                    })
                }
                None => Err(BotError::Internal(error.message)),
            },
            Err(RetryError::Exhausted { attempts, last }) => Err(BotError::RetriesExhausted {
                attempts,
                last_error: match last.status {
                    Some(status) => format!("HTTP {}: {}", status, last.message),
                    None => last.message,
                },
            }),
        }
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<T> {
        self.fetch(url, options).await?.json()
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY {
        let mut short: String = body.chars().take(MAX_ERROR_BODY).collect();
        short.push('…');
        short
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).chars().count(), MAX_ERROR_BODY + 1);
    }
}
