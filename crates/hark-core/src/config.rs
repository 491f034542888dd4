//! Configuration management for hark.
//!
//! Settings come from an optional TOML file in the user's config directory,
//! then environment variables are layered on top.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{API_BASE_ENV, API_KEY_ENV, APP_NAME, LANGUAGE_ENV, MODEL_ENV};

/// Configuration for a transcription run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// OpenAI API key
    #[serde(default)]
    pub openai_key: Option<String>,

    /// Model to use for transcriptions
    #[serde(default)]
    pub model: Option<String>,

    /// Preferred language for transcription (ISO 639-1 code)
    #[serde(default)]
    pub language: Option<String>,

    /// Base URL of the transcription API, e.g. `https://api.openai.com/v1`
    #[serde(default)]
    pub api_base: Option<String>,
}

impl Config {
    /// Get the OpenAI API key, treating a blank value as unset
    pub fn key_openai(&self) -> Option<&str> {
        self.openai_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the model name
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Get the preferred language
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Get the API base URL
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are ignored so that `OPENAI_API_KEY=` does not wipe a key
    /// set in the config file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.openai_key = Some(key);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = Some(model);
        }
        if let Some(language) = get(LANGUAGE_ENV) {
            self.language = Some(language);
        }
        if let Some(base) = get(API_BASE_ENV) {
            debug!(api_base = %base, "Using API base from environment");
            self.api_base = Some(base);
        }
    }
}

/// Locates and loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration path.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager reading from a specific file.
    pub fn with_config_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration file, or defaults if it does not exist.
    ///
    /// Environment overrides are not applied here; see [`ConfigManager::resolve`].
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = ?self.config_path, "No config file, using defaults");
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        Ok(config)
    }

    /// Loads the configuration file and applies overrides from the process environment.
    pub fn resolve(&self) -> Result<Config> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Loads the configuration file and applies overrides from `lookup`.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load()?;
        config.apply_overrides(lookup);

        if config.key_openai().is_none() {
            warn!(
                "OpenAI API key is not set. Export {} or set openai_key in {:?}.",
                API_KEY_ENV, self.config_path
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.openai_key.is_none());
        assert!(config.model.is_none());
        assert!(config.api_base.is_none());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_path(temp_dir.path().join("absent.toml"));

        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_load_reads_all_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hark.toml");
        fs::write(
            &path,
            "openai_key = \"test-key\"\nmodel = \"whisper-1\"\napi_base = \"http://localhost:8080/v1\"\n",
        )
        .unwrap();

        let loaded = ConfigManager::with_config_path(&path).load().unwrap();

        assert_eq!(loaded.key_openai(), Some("test-key"));
        assert_eq!(loaded.model(), Some("whisper-1"));
        assert_eq!(loaded.api_base(), Some("http://localhost:8080/v1"));
        assert_eq!(loaded.language(), None);
    }

    #[test]
    fn test_blank_key_counts_as_unset() {
        let config = Config {
            openai_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.key_openai(), None);
    }

    #[test]
    fn test_resolve_with_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hark.toml");
        fs::write(&path, "openai_key = \"\"\nlanguage = \"fr\"\n").unwrap();
        let vars = env(&[(API_KEY_ENV, "from-env")]);

        let config = ConfigManager::with_config_path(&path)
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();

        assert_eq!(config.key_openai(), Some("from-env"));
        assert_eq!(config.language(), Some("fr"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hark.toml");
        fs::write(&path, "openai_key = [").unwrap();

        let err = ConfigManager::with_config_path(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            openai_key: Some("from-file".to_string()),
            model: Some("whisper-1".to_string()),
            ..Default::default()
        };
        let vars = env(&[
            (API_KEY_ENV, "from-env"),
            (API_BASE_ENV, "http://127.0.0.1:9999/v1"),
        ]);

        config.apply_overrides(|name| vars.get(name).cloned());

        assert_eq!(config.key_openai(), Some("from-env"));
        assert_eq!(config.model(), Some("whisper-1"));
        assert_eq!(config.api_base(), Some("http://127.0.0.1:9999/v1"));
        assert_eq!(config.language(), None);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config {
            openai_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let vars = env(&[(API_KEY_ENV, ""), (LANGUAGE_ENV, "  ")]);

        config.apply_overrides(|name| vars.get(name).cloned());

        assert_eq!(config.key_openai(), Some("from-file"));
        assert_eq!(config.language(), None);
    }
}
