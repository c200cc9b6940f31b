// Command parsing tests
// Author: kelexine (https://github.com/kelexine)

use ftcbot::bot::{parse, respond, Command, Incoming};
use ftcbot::error::BotError;

fn ok(content: &str) -> Command {
    match parse("!", content) {
        Some(Ok(command)) => command,
        other => panic!("expected a command for {:?}, got {:?}", content, other),
    }
}

fn usage(content: &str) -> String {
    match parse("!", content) {
        Some(Err(BotError::Usage(hint))) => hint,
        other => panic!("expected a usage error for {:?}, got {:?}", content, other),
    }
}

#[test]
fn test_not_a_command() {
    assert!(parse("!", "hello there").is_none());
    assert!(parse("!", "").is_none());
    assert!(parse("!", "!").is_none());
    assert!(parse("!", "what is !team 1").is_none());
}

#[test]
fn test_events() {
    assert_eq!(ok("!events"), Command::Events { search: None });
    assert_eq!(
        ok("!events  Ohio State Championship "),
        Command::Events {
            search: Some("Ohio State Championship".to_string())
        }
    );
}

#[test]
fn test_event_and_teams() {
    assert_eq!(
        ok("!event usohcmp"),
        Command::Event {
            code: "USOHCMP".to_string(),
            season: None
        }
    );
    assert_eq!(
        ok("!teams USOHCMP 2023"),
        Command::Teams {
            event_code: "USOHCMP".to_string(),
            season: Some(2023)
        }
    );
    assert_eq!(
        ok("!event USOHCMP 2324"),
        Command::Event {
            code: "USOHCMP".to_string(),
            season: Some(2023)
        }
    );
}

#[test]
fn test_event_usage_errors() {
    assert_eq!(usage("!event"), "!event <code> [season]");
    assert_eq!(usage("!teams"), "!teams <event_code> [season]");
    assert_eq!(usage("!event USOHCMP lastyear"), "!event <code> [season]");
    assert_eq!(usage("!teams A 2023 extra"), "!teams <event_code> [season]");
}

#[test]
fn test_team() {
    assert_eq!(ok("!team 16461"), Command::Team { number: 16461 });
    assert_eq!(ok("!TEAM #16461"), Command::Team { number: 16461 });
    assert_eq!(usage("!team"), "!team <team_number>");
    assert_eq!(usage("!team abc"), "!team <team_number>");
    assert_eq!(usage("!team 0"), "!team <team_number>");
    assert_eq!(usage("!team 1 2"), "!team <team_number>");
}

#[test]
fn test_simple_commands() {
    assert_eq!(ok("!commands"), Command::Commands);
    assert_eq!(ok("!help"), Command::Commands);
    assert_eq!(ok("!ping"), Command::Ping);
    assert_eq!(
        ok("!echo hi  there"),
        Command::Echo {
            text: "hi  there".to_string()
        }
    );
    assert_eq!(usage("!echo"), "!echo <text>");
}

#[test]
fn test_unknown_command() {
    assert!(matches!(
        parse("!", "!dance"),
        Some(Err(BotError::UnknownCommand(_)))
    ));
}

#[test]
fn test_custom_prefix() {
    assert_eq!(parse("?", "?ping").unwrap().unwrap(), Command::Ping);
    assert!(parse("?", "!ping").is_none());
    assert_eq!(usage_with("ftc ", "ftc team"), "ftc team <team_number>");
}

fn usage_with(prefix: &str, content: &str) -> String {
    match parse(prefix, content) {
        Some(Err(BotError::Usage(hint))) => hint,
        other => panic!("expected a usage error, got {:?}", other),
    }
}

fn greeting(content: &str) -> Option<String> {
    match respond("!", content, false, "<@42>") {
        Some(Incoming::Greeting(text)) => Some(text),
        _ => None,
    }
}

#[test]
fn test_hello_any_case() {
    for content in ["hello", "Hello", "HELLO", "  hElLo  "] {
        assert_eq!(greeting(content).as_deref(), Some("Hello, <@42>!"), "{:?}", content);
    }
    assert_eq!(greeting("hello there"), None);
    assert_eq!(greeting("!hello"), None);
}

#[test]
fn test_bot_authors_ignored() {
    assert!(respond("!", "hello", true, "<@1>").is_none());
    assert!(respond("!", "!ping", true, "<@1>").is_none());
    assert!(respond("!", "!dance", true, "<@1>").is_none());
}

#[test]
fn test_respond_passes_commands_through() {
    assert!(matches!(
        respond("!", "!ping", false, "<@42>"),
        Some(Incoming::Command(Ok(Command::Ping)))
    ));
    assert!(matches!(
        respond("!", "!team abc", false, "<@42>"),
        Some(Incoming::Command(Err(BotError::Usage(_))))
    ));
    assert!(respond("!", "just chatting", false, "<@42>").is_none());
}
