//! Process configuration read from the environment.

use parlor_room::RoomConfig;

/// Environment variable holding the bot access token. Required.
pub const ENV_BOT_TOKEN: &str = "PARLOR_BOT_TOKEN";
/// Address the bridge gateway listens on.
pub const ENV_BIND: &str = "PARLOR_BIND";
pub const ENV_FIRST_ROOM_ID: &str = "PARLOR_FIRST_ROOM_ID";
pub const ENV_MAX_ROOMS: &str = "PARLOR_MAX_ROOMS";

const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything the gateway process needs at start-up.
#[derive(Clone)]
pub struct GatewayConfig {
    pub bind_addr: String,
    /// Bridges must present this in their `Hello` frame. Never logged.
    pub bot_token: String,
    pub rooms: RoomConfig,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("bind_addr", &self.bind_addr)
            .field("bot_token", &"<redacted>")
            .field("rooms", &self.rooms)
            .finish()
    }
}

impl GatewayConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source. Unset optional
    /// variables fall back to defaults; set-but-unparsable ones are errors.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bot_token = lookup(ENV_BOT_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_BOT_TOKEN))?;

        let defaults = RoomConfig::default();
        let rooms = RoomConfig {
            first_room_id: parse_or(&lookup, ENV_FIRST_ROOM_ID, defaults.first_room_id)?,
            max_rooms: parse_or(&lookup, ENV_MAX_ROOMS, defaults.max_rooms)?,
        };

        Ok(Self {
            bind_addr: lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            bot_token: bot_token.trim().to_string(),
            rooms,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_from_lookup_missing_token_is_error() {
        assert!(matches!(
            config_from(&[]),
            Err(ConfigError::Missing(ENV_BOT_TOKEN))
        ));
        assert!(matches!(
            config_from(&[(ENV_BOT_TOKEN, "   ")]),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        let config = config_from(&[(ENV_BOT_TOKEN, "abc")]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND);
        assert_eq!(config.bot_token, "abc");
        assert_eq!(config.rooms, RoomConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = config_from(&[
            (ENV_BOT_TOKEN, "abc"),
            (ENV_BIND, "0.0.0.0:9000"),
            (ENV_FIRST_ROOM_ID, "1"),
            (ENV_MAX_ROOMS, " 25 "),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.rooms.first_room_id, 1);
        assert_eq!(config.rooms.max_rooms, 25);
    }

    #[test]
    fn test_from_lookup_invalid_number_is_error() {
        let result = config_from(&[(ENV_BOT_TOKEN, "abc"), (ENV_MAX_ROOMS, "lots")]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { var: ENV_MAX_ROOMS, .. })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = config_from(&[(ENV_BOT_TOKEN, "super-secret")]).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
