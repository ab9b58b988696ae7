use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::i18n::Language;

const DEFAULT_API_BASE_URL: &str = "https://fastgpt-pro.aibus88.com/api/v1";
pub const API_KEY_ENV: &str = "HAOWISE_API_KEY";

/// Main application configuration, stored as TOML in the Haowise home
/// directory. The selected interface language lives here so it survives
/// restarts; everything else about a session is transient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Interface language, re-read at startup.
    #[serde(default)]
    pub language: Language,

    /// Chat assistant endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Haowise home directory (not serialized; derived at load time).
    #[serde(skip)]
    pub config_home: PathBuf,
}

/// Chat-completions endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer credential; the HAOWISE_API_KEY environment variable takes
    /// effect when this is unset.
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: Language::default(),
            api: ApiConfig::default(),
            config_home: config_home(),
        }
    }
}

fn config_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".haowise")
}

impl Config {
    /// Load configuration from disk, creating the config directory on
    /// first run. A missing file yields the defaults (language zh).
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let config_home = home.join(".haowise");
        let config_path = config_home.join("config.toml");

        fs::create_dir_all(&config_home).context("Failed to create .haowise directory")?;

        let mut config: Config = if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        config.config_home = config_home;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.config_home).context("Failed to create .haowise directory")?;
        let config_path = self.config_home.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Check if a credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api.api_key.is_some() || std::env::var(API_KEY_ENV).is_ok()
    }

    /// Get the credential from config or environment.
    pub fn api_key(&self) -> Option<String> {
        self.api
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }

    /// Update the persisted interface language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_chinese_and_the_public_endpoint() {
        let config = Config::default();
        assert_eq!(config.language, Language::Zh);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.set_language(Language::En);
        config.api.api_key = Some("secret".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.language, Language::En);
        assert_eq!(parsed.api.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.language, Language::Zh);
        assert_eq!(parsed.api.base_url, DEFAULT_API_BASE_URL);
    }
}
