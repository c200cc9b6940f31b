// Reply rendering
// Author: kelexine (https://github.com/kelexine)

use super::commands::{usage, COMMANDS};
use crate::api::{ProfileSource, TeamProfile};
use crate::models::scout::{Event, EventTeam};

/// Discord caps embeds at 25 fields.
const MAX_FIELDS: usize = 25;
/// Discord caps field values at 1024 characters.
const MAX_FIELD_VALUE: usize = 1024;
/// Discord caps embed descriptions at 4096 characters.
const MAX_DESCRIPTION: usize = 4096;
/// Discord caps titles and field names at 256 characters.
const MAX_NAME: usize = 256;
/// Discord caps the combined text of an embed at 6000 characters.
const MAX_EMBED_TOTAL: usize = 6000;
/// Room held back for a footer set after the fields.
const FOOTER_RESERVE: usize = 64;

const COLOR_FTC: u32 = 0xF57E25;

/// What the bot sends back. Kept free of serenity types so rendering can be
/// tested without a gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(EmbedReply),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedReply {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub color: u32,
    /// Set once a field was dropped for lack of room; later fields are dropped too.
    full: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedReply {
    fn new(title: impl Into<String>) -> Self {
        let title: String = title.into();
        Self {
            title: clip(&title, MAX_NAME),
            color: COLOR_FTC,
            ..Default::default()
        }
    }

    /// Add a field unless it would break an embed limit. Fields with a blank
    /// name or value are skipped.
    fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        let (name, value): (String, String) = (name.into(), value.into());
        let name = clip(name.trim(), MAX_NAME);
        let value = clip(value.trim(), MAX_FIELD_VALUE);
        if name.is_empty() || value.is_empty() || self.full {
            return self;
        }

        let size = name.chars().count() + value.chars().count();
        if self.fields.len() >= MAX_FIELDS
            || self.total_chars() + size > MAX_EMBED_TOTAL - FOOTER_RESERVE
        {
            self.full = true;
            return self;
        }

        self.fields.push(EmbedField { name, value, inline });
        self
    }

    /// Characters Discord counts toward the embed total.
    pub fn total_chars(&self) -> usize {
        let count = |s: &str| s.chars().count();
        count(&self.title)
            + self.description.as_deref().map_or(0, count)
            + self.footer.as_deref().map_or(0, count)
            + self
                .fields
                .iter()
                .map(|f| count(&f.name) + count(&f.value))
                .sum::<usize>()
    }

    fn optional_field(self, name: &str, value: Option<String>, inline: bool) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.field(name, value, inline),
            None => self,
        }
    }

    fn description(mut self, text: String) -> Self {
        self.description = Some(clip(&text, MAX_DESCRIPTION));
        self
    }
}

pub fn events(events: &[Event], query: Option<&str>, season: i32) -> Reply {
    if events.is_empty() {
        return Reply::Text(match query {
            Some(q) => format!("No {} events found matching \"{}\".", season, q),
            None => format!("No {} events found.", season),
        });
    }

    let title = match query {
        Some(q) => format!("Events matching \"{}\"", q),
        None => format!("{} season events", season),
    };
    let mut embed = EmbedReply::new(title);
    for event in events {
        let mut lines = vec![format!("Code: `{}`", event.code)];
        if let Some(dates) = date_range(event) {
            lines.push(dates);
        }
        if let Some(location) = event.location() {
            lines.push(location);
        }
        embed = embed.field(&event.name, lines.join("\n"), false);
    }
    Reply::Embed(embed)
}

pub fn event(event: &Event) -> Reply {
    let mut embed = EmbedReply::new(&event.name)
        .field("Code", format!("`{}`", event.code), true)
        .field("Season", event.season.to_string(), true)
        .optional_field("Type", event.event_type.clone(), true)
        .optional_field("Dates", date_range(event), true)
        .optional_field("Location", event.location(), true)
        .optional_field("Venue", event.venue.clone(), true);
    if event.remote {
        embed = embed.field("Format", "Remote", true);
    }
    embed.url = event.website.clone().filter(|w| w.starts_with("http"));
    Reply::Embed(embed)
}

pub fn event_teams(code: &str, teams: &[EventTeam]) -> Reply {
    if teams.is_empty() {
        return Reply::Text(format!("No teams are registered for `{}` yet.", code));
    }

    let lines: Vec<String> = teams.iter().map(team_line).collect();
    let mut description = String::new();
    let mut shown = 0;
    for line in &lines {
        // leave room for the "and N more" tail
        if description.len() + line.len() + 1 > MAX_DESCRIPTION - 40 {
            break;
        }
        description.push_str(line);
        description.push('\n');
        shown += 1;
    }
    if shown < lines.len() {
        description.push_str(&format!("…and {} more", lines.len() - shown));
    }

    let mut embed = EmbedReply::new(format!("Teams at {}", code)).description(description);
    embed.footer = Some(format!("{} teams", teams.len()));
    Reply::Embed(embed)
}

fn team_line(team: &EventTeam) -> String {
    let Some(stats) = &team.stats else {
        return format!("**{}**", team.team_number);
    };

    let mut parts = Vec::new();
    if let Some(rank) = stats.rank {
        parts.push(format!("#{}", rank));
    }
    if let (Some(w), Some(l)) = (stats.wins, stats.losses) {
        parts.push(format!("{}-{}-{}", w, l, stats.ties.unwrap_or(0)));
    }
    if let Some(rp) = stats.rp {
        parts.push(format!("RP {:.2}", rp));
    }

    if parts.is_empty() {
        format!("**{}**", team.team_number)
    } else {
        format!("**{}** · {}", team.team_number, parts.join(" · "))
    }
}

pub fn team(profile: &TeamProfile) -> Reply {
    let mut embed = EmbedReply::new(format!("{} · {}", profile.number, profile.name))
        .optional_field("Organization", profile.organization.clone(), false)
        .optional_field("Location", profile.location.clone(), true)
        .optional_field("Rookie Year", profile.rookie_year.map(|y| y.to_string()), true);

    if profile.stats.is_empty() {
        embed = embed.field("Quick Stats", "No stats available.", false);
    } else {
        for stat in &profile.stats {
            embed = embed.field(&stat.label, &stat.value, true);
        }
    }

    embed.url = profile.website.clone().filter(|w| w.starts_with("http"));
    embed.footer = Some(match profile.source {
        ProfileSource::Primary => "Data: FTCScout".to_string(),
        ProfileSource::Secondary => "Data: The Orange Alliance".to_string(),
    });
    Reply::Embed(embed)
}

pub fn command_list(prefix: &str) -> Reply {
    let lines: Vec<String> = COMMANDS
        .entries()
        .map(|(name, (_, about))| format!("`{}` {}", usage(prefix, name), about))
        .collect();
    Reply::Embed(EmbedReply::new("Commands").description(lines.join("\n")))
}

fn date_range(event: &Event) -> Option<String> {
    match (event.start, event.end) {
        (Some(start), Some(end)) if start != end => Some(format!(
            "{} to {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )),
        (Some(start), _) => Some(start.format("%b %-d, %Y").to_string()),
        _ => None,
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars - 1).collect();
    clipped.push('…');
    clipped
}
