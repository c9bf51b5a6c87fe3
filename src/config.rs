// Process configuration, read once at startup.
//
// `.env` is loaded by main before this runs, so everything here reads plain
// environment variables.

use std::path::PathBuf;

use crate::infra::roblox::roblox_client::{DEFAULT_INVENTORY_API_URL, DEFAULT_USERS_API_URL};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Add it to your .env file.")]
    Missing(&'static str),
    #[error("{name} must be a numeric Discord id, got `{value}`")]
    InvalidId { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub guild_id: u64,
    pub users_api_url: String,
    pub inventory_api_url: String,
    /// Replaces the built-in tiers when set.
    pub tiers_file: Option<PathBuf>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = non_empty("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let raw_guild = non_empty("GUILD_ID").ok_or(ConfigError::Missing("GUILD_ID"))?;
        let guild_id = raw_guild
            .trim()
            .parse::<u64>()
            .ok()
            // serenity ids are non-zero and panic on u64::MAX.
            .filter(|id| *id != 0 && *id != u64::MAX)
            .ok_or(ConfigError::InvalidId {
                name: "GUILD_ID",
                value: raw_guild.clone(),
            })?;

        Ok(Self {
            discord_token,
            guild_id,
            users_api_url: non_empty("ROBLOX_USERS_API_URL")
                .unwrap_or_else(|| DEFAULT_USERS_API_URL.to_string()),
            inventory_api_url: non_empty("ROBLOX_INVENTORY_API_URL")
                .unwrap_or_else(|| DEFAULT_INVENTORY_API_URL.to_string()),
            tiers_file: non_empty("ACCESS_TIERS_FILE").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn required_values_and_defaults() {
        let config = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "1309964400000000000")]).unwrap();
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.guild_id, 1309964400000000000);
        assert_eq!(config.users_api_url, "https://api.roblox.com");
        assert_eq!(config.inventory_api_url, "https://inventory.roblox.com");
        assert!(config.tiers_file.is_none());
    }

    #[test]
    fn missing_token_fails_fast() {
        assert_eq!(
            load(&[("GUILD_ID", "1")]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
        assert_eq!(
            load(&[("DISCORD_TOKEN", " "), ("GUILD_ID", "1")]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn guild_id_must_be_numeric() {
        let err = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "my-server")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidId { name: "GUILD_ID", .. }));
        assert_eq!(
            load(&[("DISCORD_TOKEN", "abc")]).unwrap_err(),
            ConfigError::Missing("GUILD_ID")
        );
    }

    #[test]
    fn guild_id_outside_discord_range_is_rejected() {
        for raw in ["0", "18446744073709551615"] {
            let err = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", raw)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidId {
                    name: "GUILD_ID",
                    value: raw.to_string(),
                }
            );
        }
    }

    #[test]
    fn overrides_are_honoured() {
        let config = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("GUILD_ID", "7"),
            ("ROBLOX_USERS_API_URL", "http://localhost:8080"),
            ("ACCESS_TIERS_FILE", "tiers.json"),
        ])
        .unwrap();
        assert_eq!(config.users_api_url, "http://localhost:8080");
        assert_eq!(config.tiers_file, Some(PathBuf::from("tiers.json")));
    }
}
