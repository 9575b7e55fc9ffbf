//! Dashboard configuration
//!
//! Settings are read from a JSON document kept in `localStorage` under
//! [`CONFIG_KEY`]. Missing fields take their defaults, and a missing or
//! broken document falls back to [`AppConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_KEY: &str = "dashboardConfig";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the auth service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// `localStorage` key holding the bearer token
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_token_key() -> String {
    "authToken".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_key: default_token_key(),
            currency_symbol: default_currency_symbol(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the stored document. No document at all means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(CONFIG_KEY).ok().flatten());

        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
