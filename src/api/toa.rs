// The Orange Alliance client (secondary source)
// Author: kelexine (https://github.com/kelexine)

use super::season::toa_season_key;
use crate::config::ToaConfig;
use crate::error::{BotError, Result};
use crate::fetch::{FetchOptions, Fetcher, Source};
use crate::models::toa::{ToaResult, ToaTeam};
use crate::scrape::StatEntry;
use tracing::debug;
use zeroize::Zeroizing;

/// Client for TOA. Only constructed when an API key is configured.
#[derive(Clone)]
pub struct ToaClient {
    fetcher: Fetcher,
    base_url: String,
    key: Zeroizing<String>,
    application_origin: String,
}

impl ToaClient {
    /// Returns `None` when no key is configured.
    pub fn from_config(fetcher: Fetcher, config: &ToaConfig) -> Option<Self> {
        let key = config.key.clone()?;
        Some(Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key,
            application_origin: config.application_origin.clone(),
        })
    }

    pub async fn team(&self, number: u32) -> Result<ToaTeam> {
        let url = format!("{}/team/{}", self.base_url, number);
        let teams: Vec<ToaTeam> = self.fetcher.fetch_json(&url, &self.options()).await?;
        teams
            .into_iter()
            .next()
            .ok_or_else(|| BotError::Secondary(format!("empty team response for {}", number)))
    }

    pub async fn results(&self, number: u32, season: i32) -> Result<Vec<ToaResult>> {
        let url = format!(
            "{}/team/{}/results/{}",
            self.base_url,
            number,
            toa_season_key(season)
        );
        self.fetcher.fetch_json(&url, &self.options()).await
    }

    fn options(&self) -> FetchOptions {
        FetchOptions::new(Source::Secondary)
            .header("Content-Type", "application/json")
            .header("X-TOA-Key", self.key.as_str())
            .header("X-Application-Origin", self.application_origin.as_str())
    }
}

/// Season summary from per-event results, in a fixed order.
pub fn summarize_results(results: &[ToaResult]) -> Vec<StatEntry> {
    if results.is_empty() {
        debug!("No TOA results to summarize");
        return Vec::new();
    }

    let mut stats = vec![StatEntry::new("Events", results.len().to_string())];

    if let Some(best) = results.iter().filter_map(|r| r.rank).min() {
        stats.push(StatEntry::new("Best rank", best.to_string()));
    }

    let (wins, losses, ties) = results.iter().fold((0, 0, 0), |(w, l, t), r| {
        (
            w + r.wins.unwrap_or(0),
            l + r.losses.unwrap_or(0),
            t + r.ties.unwrap_or(0),
        )
    });
    stats.push(StatEntry::new("Record", format!("{}-{}-{}", wins, losses, ties)));

    let best = |pick: fn(&ToaResult) -> Option<f64>| {
        results
            .iter()
            .filter_map(pick)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    };
    if let Some(opr) = best(|r| r.opr) {
        stats.push(StatEntry::new("Best OPR", format!("{:.2}", opr)));
    }
    if let Some(np_opr) = best(|r| r.np_opr) {
        stats.push(StatEntry::new("Best NP OPR", format!("{:.2}", np_opr)));
    }

    stats
}
