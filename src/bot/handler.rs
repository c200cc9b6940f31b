// Discord event handler and command execution
// Author: kelexine (https://github.com/kelexine)

use super::commands::{self, Command, Incoming};
use super::render::{self, EmbedReply, Reply};
use crate::api::DataService;
use crate::error::{BotError, Result};
use crate::metrics;
use crate::utils::logging::sanitize;
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::gateway::{ConnectionStage, ShardStageUpdateEvent};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::mention::Mentionable;
use serenity::prelude::{Context, EventHandler};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, Instrument};

const SEND_FAILED: &str = "Couldn't display that result, please try again later.";

/// Serenity handler; one instance serves every shard.
pub struct Handler {
    service: DataService,
    prefix: String,
    connected: Arc<AtomicBool>,
}

impl Handler {
    /// `connected` is shared with the health server.
    pub fn new(service: DataService, prefix: impl Into<String>, connected: Arc<AtomicBool>) -> Self {
        Self {
            service,
            prefix: prefix.into(),
            connected,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
        self.connected.store(true, Ordering::Relaxed);
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        debug!("Shard {} stage {:?} -> {:?}", event.shard_id, event.old, event.new);
        self.connected
            .store(event.new == ConnectionStage::Connected, Ordering::Relaxed);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let mention = msg.author.mention().to_string();
        let reply = match commands::respond(&self.prefix, &msg.content, msg.author.bot, &mention) {
            None => return,
            Some(Incoming::Greeting(text)) => Reply::Text(text),
            Some(Incoming::Command(parsed)) => {
                let span = info_span!(
                    "command",
                    id = %uuid::Uuid::new_v4().simple(),
                    author = %msg.author.id,
                    channel = %msg.channel_id
                );
                if parsed.as_ref().is_ok_and(needs_upstream) {
                    let _ = msg.channel_id.broadcast_typing(&ctx.http).await;
                }
                execute(&self.service, &self.prefix, parsed)
                    .instrument(span)
                    .await
            }
        };

        if let Err(e) = send(&ctx, &msg, reply).await {
            error!("Failed to send reply: {}", sanitize(&e.to_string()));
            // Discord rejected the reply itself; tell the user something
            let _ = msg.channel_id.say(&ctx.http, SEND_FAILED).await;
        }
    }
}

fn needs_upstream(command: &Command) -> bool {
    matches!(
        command,
        Command::Events { .. } | Command::Event { .. } | Command::Teams { .. } | Command::Team { .. }
    )
}

/// Run a parsed command to completion. Failures become user-facing text;
/// nothing here propagates past the handler.
pub async fn execute(service: &DataService, prefix: &str, parsed: Result<Command>) -> Reply {
    let started = Instant::now();

    let command = match parsed {
        Ok(command) => command,
        Err(e) => {
            debug!("Rejected command: {}", e);
            metrics::record_command("invalid", "usage", started.elapsed().as_secs_f64());
            return Reply::Text(e.user_message());
        }
    };

    let name = command.name();
    debug!("Executing {:?}", command);

    let result = run(service, prefix, command).await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(BotError::NotFound(_)) => "not_found",
        Err(e) if e.is_upstream() => "upstream_error",
        Err(_) => "error",
    };
    metrics::record_command(name, outcome, started.elapsed().as_secs_f64());

    result.unwrap_or_else(|e| {
        if e.is_upstream() {
            error!("{} failed: {}", name, sanitize(&e.to_string()));
        }
        Reply::Text(e.user_message())
    })
}

async fn run(service: &DataService, prefix: &str, command: Command) -> Result<Reply> {
    match command {
        Command::Events { search } => {
            let events = service.search_events(search.as_deref()).await?;
            Ok(render::events(&events, search.as_deref(), service.season()))
        }
        Command::Event { code, season } => {
            let event = service
                .event(&code, season)
                .await
                .map_err(|e| e.not_found_as(format!("event `{}`", code)))?;
            Ok(render::event(&event))
        }
        Command::Teams { event_code, season } => {
            let teams = service
                .event_teams(&event_code, season)
                .await
                .map_err(|e| e.not_found_as(format!("event `{}`", event_code)))?;
            Ok(render::event_teams(&event_code, &teams))
        }
        Command::Team { number } => {
            let profile = service
                .team(number)
                .await
                .map_err(|e| e.not_found_as(format!("team {}", number)))?;
            Ok(render::team(&profile))
        }
        Command::Commands => Ok(render::command_list(prefix)),
        Command::Ping => Ok(Reply::Text("Pong!".to_string())),
        Command::Echo { text } => Ok(Reply::Text(text)),
    }
}

async fn send(ctx: &Context, msg: &Message, reply: Reply) -> Result<()> {
    match reply {
        Reply::Text(text) => {
            msg.channel_id.say(&ctx.http, text).await?;
        }
        Reply::Embed(embed) => {
            let message = CreateMessage::new().embed(to_serenity(embed));
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
    }
    Ok(())
}

fn to_serenity(reply: EmbedReply) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title(reply.title).colour(reply.color);
    if let Some(url) = reply.url {
        embed = embed.url(url);
    }
    if let Some(description) = reply.description {
        embed = embed.description(description);
    }
    for field in reply.fields {
        embed = embed.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = reply.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}
