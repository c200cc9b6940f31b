// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{BotError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Well-known variables (`DISCORD_TOKEN`, `TOA_KEY`, `PORT`) (highest)
    /// 2. Environment variables (prefix: FTCBOT_, nested with `__`)
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists; an explicit path must exist
            .add_source(File::from(file).required(path.is_some()))
            .add_source(
                Environment::with_prefix("FTCBOT")
                    .separator("__")
            )
            .build()
            .map_err(|e| BotError::Config(e.to_string()))?;

        let mut app: AppConfig = config
            .try_deserialize()
            .map_err(|e| BotError::Config(e.to_string()))?;

        app.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(app)
    }

    /// Apply the unprefixed variables hosting platforms and `.env` files use.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            self.discord.token = Some(Zeroizing::new(token));
        }
        if let Some(key) = lookup("TOA_KEY").filter(|k| !k.trim().is_empty()) {
            self.toa.key = Some(Zeroizing::new(key));
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
    }

    /// Check settings that cannot be defaulted. Failing here is fatal at startup.
    pub fn validate(&self) -> Result<()> {
        let token = self
            .discord
            .token
            .as_ref()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .ok_or(BotError::MissingSetting("DISCORD_TOKEN"))?;

        if token.chars().any(char::is_whitespace) {
            return Err(BotError::Config(
                "DISCORD_TOKEN must not contain whitespace".to_string(),
            ));
        }
        if self.discord.prefix.is_empty() {
            return Err(BotError::Config("command prefix must not be empty".to_string()));
        }
        if self.retry.max_attempts == 0 {
            return Err(BotError::Config("retry.max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Whether the secondary API path is enabled.
    pub fn has_toa_key(&self) -> bool {
        self.toa.key.is_some()
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ftcbot")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(BotError::MissingSetting("DISCORD_TOKEN"))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup(&[
            ("DISCORD_TOKEN", "abc.def.ghi"),
            ("TOA_KEY", "toa-secret"),
            ("PORT", "8123"),
        ]));

        assert!(config.validate().is_ok());
        assert!(config.has_toa_key());
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_blank_toa_key_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup(&[("TOA_KEY", "  ")]));
        assert!(!config.has_toa_key());
    }

    #[test]
    fn test_whitespace_token_rejected() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup(&[("DISCORD_TOKEN", "abc def")]));
        assert!(matches!(config.validate(), Err(BotError::Config(_))));
    }
}
