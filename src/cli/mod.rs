// CLI module for ftcbot
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// ftcbot - Discord bot for FIRST Tech Challenge events, teams and quick stats
#[derive(Parser, Debug)]
#[command(name = "ftcbot", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.ftcbot/config.toml)
    #[arg(short, long, env = "FTCBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Don't start the liveness HTTP server
    #[arg(long)]
    pub no_health: bool,

    /// Validate configuration and exit without connecting
    #[arg(long)]
    pub check_config: bool,
}
