// The Orange Alliance API models
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// `GET /team/{team_key}` returns a one-element array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToaTeam {
    pub team_key: String,
    #[serde(default)]
    pub team_number: Option<u32>,
    #[serde(default)]
    pub team_name_short: Option<String>,
    #[serde(default)]
    pub team_name_long: Option<String>,
    #[serde(default)]
    pub robot_name: Option<String>,
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

/// One row of `GET /team/{team_key}/results/{season_key}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToaResult {
    #[serde(default)]
    pub event_key: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub ties: Option<u32>,
    #[serde(default)]
    pub opr: Option<f64>,
    #[serde(default)]
    pub np_opr: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deserializes() {
        let json = r#"[{"team_key": "16461", "team_number": 16461,
                        "team_name_short": "Infinite Turtles", "rookie_year": 2019,
                        "last_active": "2425"}]"#;
        let teams: Vec<ToaTeam> = serde_json::from_str(json).unwrap();
        assert_eq!(teams[0].team_name_short.as_deref(), Some("Infinite Turtles"));
        assert_eq!(teams[0].rookie_year, Some(2019));
    }
}
