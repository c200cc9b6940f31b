// Data service routing and command execution against a local mock server
// Author: kelexine (https://github.com/kelexine)

use ftcbot::api::{DataService, ProfileSource};
use ftcbot::bot::{execute, parse, Reply};
use ftcbot::cache::TtlCache;
use ftcbot::config::AppConfig;
use ftcbot::fetch::Fetcher;
use ftcbot::utils::retry::RetryPolicy;
use mockito::{Matcher, ServerGuard};
use std::sync::Arc;
use std::time::Duration;
use zeroize::Zeroizing;

const TEAM_JSON: &str = r#"{"number": 16461, "name": "Infinite Turtles",
    "schoolName": "Turtle High", "city": "Austin", "stateProv": "TX",
    "country": "USA", "rookieYear": 2019}"#;

const TEAM_PAGE: &str = r#"<html><body><h2>Quick Stats</h2>
    <table><tr><td>OPR</td><td>45.2</td></tr><tr><td>Auto</td><td>12.1</td></tr></table>
    </body></html>"#;

fn service(server: &ServerGuard, toa_key: Option<&str>) -> DataService {
    let mut config = AppConfig::default();
    config.api.base_url = format!("{}/api", server.url());
    config.api.team_page_url = format!("{}/teams", server.url());
    config.api.season = Some(2024);
    config.toa.base_url = format!("{}/toa", server.url());
    config.toa.key = toa_key.map(|k| Zeroizing::new(k.to_string()));
    config.retry.max_attempts = 2;
    config.retry.initial_backoff_ms = 5;
    config.retry.max_backoff_ms = 10;

    let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
    let fetcher = Fetcher::new(&config.api, cache, RetryPolicy::from(&config.retry)).unwrap();
    DataService::new(fetcher, &config)
}

async fn run(service: &DataService, content: &str) -> Reply {
    execute(service, "!", parse("!", content).unwrap()).await
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        Reply::Embed(embed) => panic!("expected text, got embed {:?}", embed.title),
    }
}

#[tokio::test]
async fn test_primary_team_with_scraped_stats() {
    let mut server = mockito::Server::new_async().await;
    let team = server
        .mock("GET", "/api/teams/16461")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TEAM_JSON)
        .create_async()
        .await;
    let page = server
        .mock("GET", "/teams/16461")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(TEAM_PAGE)
        .create_async()
        .await;

    let profile = service(&server, None).team(16461).await.unwrap();

    team.assert_async().await;
    page.assert_async().await;
    assert_eq!(profile.source, ProfileSource::Primary);
    assert_eq!(profile.name, "Infinite Turtles");
    assert_eq!(profile.location.as_deref(), Some("Austin, TX, USA"));
    let stats: Vec<(&str, &str)> = profile
        .stats
        .iter()
        .map(|s| (s.label.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(stats, vec![("OPR", "45.2"), ("Auto", "12.1")]);
}

#[tokio::test]
async fn test_page_failure_yields_empty_stats() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/teams/16461")
        .with_status(200)
        .with_body(TEAM_JSON)
        .create_async()
        .await;
    server
        .mock("GET", "/teams/16461")
        .with_status(500)
        .create_async()
        .await;

    let profile = service(&server, None).team(16461).await.unwrap();
    assert!(profile.stats.is_empty());
}

#[tokio::test]
async fn test_secondary_preferred_when_key_configured() {
    let mut server = mockito::Server::new_async().await;
    let toa_team = server
        .mock("GET", "/toa/team/16461")
        .match_header("X-TOA-Key", "secret")
        .match_header("X-Application-Origin", "ftcbot")
        .with_status(200)
        .with_body(r#"[{"team_key": "16461", "team_number": 16461, "team_name_short": "Infinite Turtles"}]"#)
        .create_async()
        .await;
    let toa_results = server
        .mock("GET", "/toa/team/16461/results/2425")
        .with_status(200)
        .with_body(r#"[{"rank": 2, "wins": 4, "losses": 1, "ties": 0, "opr": 88.5}]"#)
        .create_async()
        .await;
    let primary = server
        .mock("GET", "/api/teams/16461")
        .expect(0)
        .create_async()
        .await;
    let page = server
        .mock("GET", "/teams/16461")
        .expect(0)
        .create_async()
        .await;

    let profile = service(&server, Some("secret")).team(16461).await.unwrap();

    toa_team.assert_async().await;
    toa_results.assert_async().await;
    primary.assert_async().await;
    page.assert_async().await;
    assert_eq!(profile.source, ProfileSource::Secondary);
    assert_eq!(profile.stats[0].label, "Events");
    assert!(profile
        .stats
        .iter()
        .any(|s| s.label == "Record" && s.value == "4-1-0"));
}

#[tokio::test]
async fn test_secondary_failure_falls_back_to_primary() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/toa/team/16461")
        .with_status(503)
        .create_async()
        .await;
    let primary = server
        .mock("GET", "/api/teams/16461")
        .with_status(200)
        .with_body(TEAM_JSON)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/teams/16461")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(TEAM_PAGE)
        .create_async()
        .await;

    let profile = service(&server, Some("secret")).team(16461).await.unwrap();

    primary.assert_async().await;
    assert_eq!(profile.source, ProfileSource::Primary);
    assert_eq!(profile.stats.len(), 2);
}

#[tokio::test]
async fn test_event_teams_sorted_by_rank() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/events/2024/USOHCMP/teams")
        .with_status(200)
        .with_body(
            r#"[
              {"season": 2024, "eventCode": "USOHCMP", "teamNumber": 300, "stats": null},
              {"season": 2024, "eventCode": "USOHCMP", "teamNumber": 200, "stats": {"rank": 2}},
              {"season": 2024, "eventCode": "USOHCMP", "teamNumber": 100, "stats": {"rank": 1}}
            ]"#,
        )
        .create_async()
        .await;

    let teams = service(&server, None)
        .event_teams("USOHCMP", None)
        .await
        .unwrap();
    let numbers: Vec<u32> = teams.iter().map(|t| t.team_number).collect();
    assert_eq!(numbers, vec![100, 200, 300]);
}

#[tokio::test]
async fn test_events_search_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/events/search/2024")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("searchText".into(), "ohio state".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"season": 2024, "code": "USOHCMP", "name": "Ohio State Championship", "start": "2025-03-01", "end": "2025-03-02"}]"#)
        .create_async()
        .await;

    let reply = run(&service(&server, None), "!events ohio state").await;

    mock.assert_async().await;
    match reply {
        Reply::Embed(embed) => {
            assert_eq!(embed.fields.len(), 1);
            assert_eq!(embed.fields[0].name, "Ohio State Championship");
            assert!(embed.fields[0].value.contains("`USOHCMP`"));
        }
        Reply::Text(text) => panic!("expected embed, got {}", text),
    }
}

#[tokio::test]
async fn test_team_not_found_reply() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/teams/99999")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/teams/99999")
        .with_status(404)
        .create_async()
        .await;

    let reply = run(&service(&server, None), "!team 99999").await;
    assert_eq!(text(reply), "Couldn't find team 99999.");
}

#[tokio::test]
async fn test_upstream_outage_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/events/2024/USOHCMP")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let reply = run(&service(&server, None), "!event USOHCMP").await;

    mock.assert_async().await;
    assert_eq!(
        text(reply),
        "Couldn't fetch data right now, please try again later."
    );
}

#[tokio::test]
async fn test_usage_and_unknown_replies() {
    let server = mockito::Server::new_async().await;
    let service = service(&server, None);

    assert_eq!(text(run(&service, "!team abc").await), "Usage: `!team <team_number>`");
    assert_eq!(
        text(run(&service, "!dance").await),
        "Unknown command. Type `!commands` for a list."
    );
    assert_eq!(text(run(&service, "!ping").await), "Pong!");
    assert_eq!(text(run(&service, "!echo hi there").await), "hi there");
}
