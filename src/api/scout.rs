// FTCScout REST API client (primary source + team profile pages)
// Author: kelexine (https://github.com/kelexine)

use crate::config::ApiConfig;
use crate::error::Result;
use crate::fetch::{FetchOptions, Fetcher, Source};
use crate::models::scout::{Event, EventTeam, Team};
use crate::scrape::{extract_stats, StatEntry};
use tracing::debug;

/// Maximum number of events requested from the search endpoint.
const SEARCH_LIMIT: usize = 10;

/// Thin typed wrapper over the FTCScout REST endpoints.
#[derive(Clone)]
pub struct ScoutClient {
    fetcher: Fetcher,
    base_url: String,
    team_page_url: String,
}

impl ScoutClient {
    pub fn new(fetcher: Fetcher, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            team_page_url: config.team_page_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search_events(&self, season: i32, query: Option<&str>) -> Result<Vec<Event>> {
        let mut url = format!("{}/events/search/{}?limit={}", self.base_url, season, SEARCH_LIMIT);
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            url.push_str("&searchText=");
            url.push_str(&urlencoding::encode(query));
        }
        self.fetcher.fetch_json(&url, &Self::options()).await
    }

    pub async fn event(&self, season: i32, code: &str) -> Result<Event> {
        let url = format!("{}/events/{}/{}", self.base_url, season, urlencoding::encode(code));
        self.fetcher.fetch_json(&url, &Self::options()).await
    }

    pub async fn event_teams(&self, season: i32, code: &str) -> Result<Vec<EventTeam>> {
        let url = format!(
            "{}/events/{}/{}/teams",
            self.base_url,
            season,
            urlencoding::encode(code)
        );
        self.fetcher.fetch_json(&url, &Self::options()).await
    }

    pub async fn team(&self, number: u32) -> Result<Team> {
        let url = format!("{}/teams/{}", self.base_url, number);
        self.fetcher.fetch_json(&url, &Self::options()).await
    }

    /// Scrape the public profile page for its quick stats block.
    ///
    /// Non-HTML responses and unrecognized markup both yield no entries.
    pub async fn quick_stats(&self, number: u32) -> Result<Vec<StatEntry>> {
        let url = format!("{}/{}", self.team_page_url, number);
        let response = self
            .fetcher
            .fetch(&url, &FetchOptions::new(Source::Page))
            .await?;

        if !response.is_html() {
            debug!("Team page {} was not HTML, skipping stats", url);
            return Ok(Vec::new());
        }
        Ok(extract_stats(&response.body))
    }

    fn options() -> FetchOptions {
        FetchOptions::new(Source::Primary)
    }
}
