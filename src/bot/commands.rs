// Text command parsing
// Author: kelexine (https://github.com/kelexine)

use crate::api::season::parse_season;
use crate::error::{BotError, Result};
use phf::phf_ordered_map;

/// Command name -> (argument usage, description), in help order.
pub static COMMANDS: phf::OrderedMap<&'static str, (&'static str, &'static str)> = phf_ordered_map! {
    "events" => ("[search]", "Search this season's events"),
    "event" => ("<code> [season]", "Show details for one event"),
    "teams" => ("<event_code> [season]", "List the teams at an event"),
    "team" => ("<team_number>", "Show a team's info and quick stats"),
    "commands" => ("", "List available commands"),
    "ping" => ("", "Check that the bot is alive"),
    "echo" => ("<text>", "Repeat a message back"),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Events { search: Option<String> },
    Event { code: String, season: Option<i32> },
    Teams { event_code: String, season: Option<i32> },
    Team { number: u32 },
    Commands,
    Ping,
    Echo { text: String },
}

impl Command {
    /// Name used in metrics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Events { .. } => "events",
            Command::Event { .. } => "event",
            Command::Teams { .. } => "teams",
            Command::Team { .. } => "team",
            Command::Commands => "commands",
            Command::Ping => "ping",
            Command::Echo { .. } => "echo",
        }
    }
}

/// Usage line for a command, e.g. `!team <team_number>`.
pub fn usage(prefix: &str, name: &str) -> String {
    match COMMANDS.get(name) {
        Some((args, _)) if !args.is_empty() => format!("{}{} {}", prefix, name, args),
        _ => format!("{}{}", prefix, name),
    }
}

/// What an incoming chat message asks of the bot.
#[derive(Debug)]
pub enum Incoming {
    /// A plain `hello`; carries the reply text.
    Greeting(String),
    /// A prefixed command, or the error explaining why it was rejected.
    Command(Result<Command>),
}

/// Decide whether and how to answer a message.
///
/// Bot authors (this bot included) are never answered. `mention` is the
/// author's mention string, e.g. `<@123>`.
pub fn respond(
    prefix: &str,
    content: &str,
    author_is_bot: bool,
    mention: &str,
) -> Option<Incoming> {
    if author_is_bot {
        return None;
    }
    if content.trim().eq_ignore_ascii_case("hello") {
        return Some(Incoming::Greeting(format!("Hello, {}!", mention)));
    }
    parse(prefix, content).map(Incoming::Command)
}

/// Parse a chat message.
///
/// Returns `None` when the message isn't addressed to the bot at all, and
/// `Some(Err(_))` for unknown commands or malformed arguments.
pub fn parse(prefix: &str, content: &str) -> Option<Result<Command>> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return None;
    }

    let name = name.to_ascii_lowercase();
    let usage_err = || BotError::Usage(usage(prefix, &name));
    let mut words = args.split_whitespace();

    let command = match name.as_str() {
        "events" => Ok(Command::Events {
            search: Some(args.to_string()).filter(|s| !s.is_empty()),
        }),
        "event" | "teams" => {
            let code = match words.next() {
                Some(code) => code.to_ascii_uppercase(),
                None => return Some(Err(usage_err())),
            };
            let season = match words.next() {
                Some(raw) => match parse_season(raw) {
                    Some(season) => Some(season),
                    None => return Some(Err(usage_err())),
                },
                None => None,
            };
            if words.next().is_some() {
                return Some(Err(usage_err()));
            }
            if name == "event" {
                Ok(Command::Event { code, season })
            } else {
                Ok(Command::Teams {
                    event_code: code,
                    season,
                })
            }
        }
        "team" => match (words.next(), words.next()) {
            (Some(raw), None) => raw
                .trim_start_matches('#')
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(|number| Command::Team { number })
                .ok_or_else(usage_err),
            _ => Err(usage_err()),
        },
        "commands" | "help" => Ok(Command::Commands),
        "ping" => Ok(Command::Ping),
        "echo" if !args.is_empty() => Ok(Command::Echo {
            text: args.to_string(),
        }),
        "echo" => Err(usage_err()),
        _ => Err(BotError::UnknownCommand(format!("{}commands", prefix))),
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lines() {
        assert_eq!(usage("!", "team"), "!team <team_number>");
        assert_eq!(usage("!", "ping"), "!ping");
    }

    #[test]
    fn test_command_table_order() {
        let names: Vec<&str> = COMMANDS.keys().copied().collect();
        assert_eq!(names.first(), Some(&"events"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_name_matches_table() {
        let commands = [
            Command::Events { search: None },
            Command::Commands,
            Command::Ping,
            Command::Team { number: 1 },
        ];
        for command in commands {
            assert!(COMMANDS.contains_key(command.name()));
        }
    }
}
