// ftcbot - Discord bot for FIRST Tech Challenge events, teams and quick stats
// Author: kelexine (https://github.com/kelexine)

pub mod api;
pub mod bot;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod models;
pub mod scrape;
pub mod server;
pub mod utils;
