// FTCScout REST API models
// Author: kelexine (https://github.com/kelexine)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An FTC event (qualifier, league meet, championship, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub season: i32,
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub remote: bool,
}

impl Event {
    /// "City, State, Country" with missing parts dropped.
    pub fn location(&self) -> Option<String> {
        join_location(&[&self.city, &self.state_prov, &self.country])
    }
}

/// A team's participation in one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTeam {
    pub season: i32,
    pub event_code: String,
    pub team_number: u32,
    #[serde(default)]
    pub stats: Option<EventTeamStats>,
}

/// Ranking fields shared by every season's stats shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTeamStats {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub rp: Option<f64>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub ties: Option<u32>,
}

/// Team detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rookie_year: Option<i32>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Team {
    pub fn location(&self) -> Option<String> {
        join_location(&[&self.city, &self.state_prov, &self.country])
    }
}

pub(crate) fn join_location(parts: &[&Option<String>]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
