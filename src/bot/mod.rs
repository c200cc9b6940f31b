//! Chat command surface.
//!
//! - `commands`: prefix parsing into [`Command`] values.
//! - `render`: turning data into [`Reply`] values (plain text or embeds).
//! - `handler`: the serenity event handler and [`execute`], which ties
//!   parsing, the data service and rendering together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod commands;
pub mod handler;
pub mod render;

pub use commands::{parse, respond, Command, Incoming};
pub use handler::{execute, Handler};
pub use render::{EmbedField, EmbedReply, Reply};

use serenity::prelude::GatewayIntents;

/// Gateway intents the bot needs to read prefixed commands.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}
