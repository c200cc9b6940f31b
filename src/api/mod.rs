//! Typed access to FTC data.
//!
//! [`DataService`] is what command handlers talk to. Its clients share one
//! [`Fetcher`] (and through it the response cache); it routes each lookup:
//!
//! - events and event teams always come from the primary API;
//! - team detail prefers TOA when a key is configured, and falls back to the
//!   primary API plus a scrape of the public profile page.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod scout;
pub mod season;
pub mod toa;

pub use scout::ScoutClient;
pub use toa::ToaClient;

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::scout::{join_location, Event, EventTeam, Team};
use crate::models::toa::ToaTeam;
use crate::scrape::StatEntry;
use serde::Serialize;
use tracing::{info, warn};

/// Where a [`TeamProfile`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Primary,
    Secondary,
}

/// Team detail plus quick stats, normalized across sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProfile {
    pub number: u32,
    pub name: String,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub rookie_year: Option<i32>,
    pub website: Option<String>,
    pub stats: Vec<StatEntry>,
    pub source: ProfileSource,
}

impl TeamProfile {
    pub fn from_primary(team: Team, stats: Vec<StatEntry>) -> Self {
        let location = team.location();
        Self {
            number: team.number,
            name: team.name,
            organization: team.school_name,
            location,
            rookie_year: team.rookie_year,
            website: team.website,
            stats,
            source: ProfileSource::Primary,
        }
    }

    pub fn from_secondary(number: u32, team: ToaTeam, stats: Vec<StatEntry>) -> Self {
        let location = join_location(&[&team.city, &team.state_prov, &team.country]);
        Self {
            number: team.team_number.unwrap_or(number),
            name: team
                .team_name_short
                .clone()
                .unwrap_or_else(|| format!("Team {}", number)),
            organization: team.team_name_long,
            location,
            rookie_year: team.rookie_year,
            website: team.website,
            stats,
            source: ProfileSource::Secondary,
        }
    }
}

#[derive(Clone)]
pub struct DataService {
    scout: ScoutClient,
    toa: Option<ToaClient>,
    pinned_season: Option<i32>,
}

impl DataService {
    pub fn new(fetcher: Fetcher, config: &AppConfig) -> Self {
        let toa = ToaClient::from_config(fetcher.clone(), &config.toa);
        if toa.is_some() {
            info!("TOA key configured, team lookups will try TOA first");
        }

        Self {
            scout: ScoutClient::new(fetcher, &config.api),
            toa,
            pinned_season: config.api.season,
        }
    }

    pub fn has_secondary(&self) -> bool {
        self.toa.is_some()
    }

    /// The configured season, or the one in progress today.
    pub fn season(&self) -> i32 {
        self.pinned_season.unwrap_or_else(season::current_season)
    }

    pub async fn search_events(&self, query: Option<&str>) -> Result<Vec<Event>> {
        self.scout.search_events(self.season(), query).await
    }

    pub async fn event(&self, code: &str, season: Option<i32>) -> Result<Event> {
        let season = season.unwrap_or_else(|| self.season());
        self.scout.event(season, code).await
    }

    pub async fn event_teams(&self, code: &str, season: Option<i32>) -> Result<Vec<EventTeam>> {
        let season = season.unwrap_or_else(|| self.season());
        let mut teams = self.scout.event_teams(season, code).await?;
        teams.sort_by_key(|t| {
            (
                t.stats.as_ref().and_then(|s| s.rank).unwrap_or(u32::MAX),
                t.team_number,
            )
        });
        Ok(teams)
    }

    /// Team detail, secondary source first when available.
    pub async fn team(&self, number: u32) -> Result<TeamProfile> {
        if let Some(toa) = &self.toa {
            match self.team_from_secondary(toa, number).await {
                Ok(profile) => return Ok(profile),
                Err(e) => warn!("TOA lookup for team {} failed, falling back: {}", number, e),
            }
        }
        self.team_from_primary(number).await
    }

    async fn team_from_secondary(&self, toa: &ToaClient, number: u32) -> Result<TeamProfile> {
        let team = toa.team(number).await?;
        let stats = match toa.results(number, self.season()).await {
            Ok(results) => toa::summarize_results(&results),
            Err(e) => {
                warn!("TOA results for team {} unavailable: {}", number, e);
                Vec::new()
            }
        };
        Ok(TeamProfile::from_secondary(number, team, stats))
    }

    async fn team_from_primary(&self, number: u32) -> Result<TeamProfile> {
        let (team, stats) = futures::join!(self.scout.team(number), self.scout.quick_stats(number));

        let stats = stats.unwrap_or_else(|e| {
            warn!("Quick stats for team {} unavailable: {}", number, e);
            Vec::new()
        });
        Ok(TeamProfile::from_primary(team?, stats))
    }
}
