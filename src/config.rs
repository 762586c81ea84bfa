//! # Configuration Module
//!
//! Settings read from the environment (after `.env` has been loaded). Only the
//! bot token is needed to connect; every other value is optional and its
//! absence disables or defaults the matching feature.

use std::env;
use std::path::PathBuf;

use crate::weather::DEFAULT_WEATHER_API_URL;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const WEATHER_API_URL_VAR: &str = "WEATHER_API_URL";
pub const CATALOG_PATH_VAR: &str = "CATALOG_PATH";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Runtime configuration of the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Telegram bot token
    pub bot_token: Option<String>,
    /// OpenWeatherMap API key; `None` disables `/weather`
    pub weather_api_key: Option<String>,
    /// OpenWeatherMap endpoint
    pub weather_api_url: String,
    /// Catalog seed file; `None` uses the embedded seed
    pub catalog_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            weather_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            catalog_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl BotConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            bot_token: var(BOT_TOKEN_VAR),
            weather_api_key: var(WEATHER_API_KEY_VAR),
            weather_api_url: var(WEATHER_API_URL_VAR).unwrap_or(defaults.weather_api_url),
            catalog_path: var(CATALOG_PATH_VAR).map(PathBuf::from),
            log_format: var(LOG_FORMAT_VAR)
                .map(|value| LogFormat::parse(&value))
                .unwrap_or(defaults.log_format),
        }
    }
}
