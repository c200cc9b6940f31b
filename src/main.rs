// ftcbot - Discord bot for FIRST Tech Challenge events, teams and quick stats
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use ftcbot::api::DataService;
use ftcbot::bot::{self, Handler};
use ftcbot::cache::TtlCache;
use ftcbot::cli::Args;
use ftcbot::config::AppConfig;
use ftcbot::error::BotError;
use ftcbot::fetch::Fetcher;
use ftcbot::server::{self, AppState};
use ftcbot::utils::logging;
use ftcbot::utils::retry::RetryPolicy;
use serenity::Client;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration (.env first so it feeds the env layer)
    dotenv::dotenv().ok();
    let config = AppConfig::load(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting ftcbot v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Validate; a missing token is fatal before we connect
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }
    if args.check_config {
        info!("Configuration OK");
        return Ok(());
    }

    // Phase 4: Build the data layer around one shared cache
    let cache = Arc::new(TtlCache::new(Duration::from_secs(config.cache.ttl_seconds)));
    let fetcher = Fetcher::new(&config.api, cache.clone(), RetryPolicy::from(&config.retry))?;
    let service = DataService::new(fetcher, &config);
    info!(
        "Data sources ready (season {}, cache TTL {}s)",
        service.season(),
        config.cache.ttl_seconds
    );

    // Phase 5: Build the Discord client
    let token = config
        .discord
        .token
        .clone()
        .ok_or(BotError::MissingSetting("DISCORD_TOKEN"))?;
    let connected = Arc::new(AtomicBool::new(false));
    let handler = Handler::new(service.clone(), config.discord.prefix.clone(), connected.clone());
    let mut client = Client::builder(token.as_str(), bot::intents())
        .event_handler(handler)
        .await?;

    // Phase 6: Liveness server, stopped when the bot stops
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let health = if config.server.enabled && !args.no_health {
        let state = AppState::new(cache.clone(), connected, service.has_secondary());
        let server_config = config.server.clone();
        let mut stop_rx = stop_rx.clone();
        Some(tokio::spawn(async move {
            let stop = async move {
                let _ = stop_rx.changed().await;
            };
            if let Err(e) = server::serve(&server_config, state, stop).await {
                error!("Health server stopped: {}", e);
            }
        }))
    } else {
        None
    };

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shard_manager.shutdown_all().await;
    });

    // Phase 7: Run until the gateway closes or we're told to stop
    info!("Connecting to Discord with prefix {:?}", config.discord.prefix);
    let result = client.start().await;

    let _ = stop_tx.send(true);
    if let Some(handle) = health {
        let _ = handle.await;
    }
    result?;

    info!("Bot shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
