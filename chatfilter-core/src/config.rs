//! Configuration management for `chatfilter-core`.
//!
//! This module defines the on-disk shape of the filter configuration: the
//! forbidden word and pattern lists, the mask character, the warning message,
//! the per-surface toggles and the logging switch. It handles YAML
//! deserialization and supplies the documented defaults for every missing key.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ChatFilterError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Mask character used when `censor-character` is missing or empty.
pub const DEFAULT_CENSOR_CHAR: char = '*';

/// Warning sent to an actor whose submission was censored.
pub const DEFAULT_WARNING_MESSAGE: &str = "&cYou are not allowed to use that language!";

/// File name used for the default configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// The configuration file written on first start.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../config/default_config.yaml");

/// The complete, user-editable filter configuration.
///
/// Keys use kebab-case on disk (`forbidden-words`, `censor-character`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Literal fragments, matched case-insensitively as substrings.
    pub forbidden_words: Vec<String>,
    /// Regex sources, compiled case-insensitive.
    pub forbidden_regex: Vec<String>,
    /// Only the first character is used.
    pub censor_character: String,
    /// Template with `&` colour codes.
    pub warning_message: String,
    pub filter_chat: bool,
    pub filter_signs: bool,
    pub filter_books: bool,
    pub filter_anvils: bool,
    pub enable_logging: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            forbidden_words: Vec::new(),
            forbidden_regex: Vec::new(),
            censor_character: DEFAULT_CENSOR_CHAR.to_string(),
            warning_message: DEFAULT_WARNING_MESSAGE.to_string(),
            filter_chat: true,
            filter_signs: true,
            filter_books: true,
            filter_anvils: true,
            enable_logging: true,
        }
    }
}

impl FilterConfig {
    /// Loads the configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading filter configuration from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ChatFilterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} forbidden words and {} forbidden patterns from {}.",
            config.forbidden_words.len(),
            config.forbidden_regex.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ChatFilterError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(text).map_err(|e| ChatFilterError::ConfigParse(e.to_string()))
    }

    /// Loads the configuration shipped with the crate.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        Self::from_yaml_str(DEFAULT_CONFIG_YAML).context("Failed to parse default configuration")
    }

    /// The configured mask character, falling back to `*` when the setting is empty.
    pub fn censor_char(&self) -> char {
        self.censor_character.chars().next().unwrap_or(DEFAULT_CENSOR_CHAR)
    }
}

/// Somewhere a [`FilterConfig`] can be (re)read from.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<FilterConfig>;
}

/// Reads the configuration from a YAML file, or the embedded defaults when no path is set.
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource {
    pub path: Option<PathBuf>,
}

impl FileConfigSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<FilterConfig> {
        match &self.path {
            Some(path) => FilterConfig::load_from_file(path),
            None => FilterConfig::load_default(),
        }
    }
}

/// `<config dir>/chatfilter/config.yml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatfilter").join(CONFIG_FILE_NAME))
}

/// `<data dir>/chatfilter`, where the offense log lives by default.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("chatfilter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = FilterConfig::from_yaml_str("forbidden-words: [heck]").unwrap();
        assert_eq!(config.forbidden_words, vec!["heck".to_string()]);
        assert!(config.forbidden_regex.is_empty());
        assert_eq!(config.censor_char(), '*');
        assert_eq!(config.warning_message, DEFAULT_WARNING_MESSAGE);
        assert!(config.filter_chat && config.filter_signs && config.filter_books && config.filter_anvils);
        assert!(config.enable_logging);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(FilterConfig::from_yaml_str("  \n").unwrap(), FilterConfig::default());
    }

    #[test]
    fn censor_char_uses_first_character() {
        let config = FilterConfig {
            censor_character: "#!".to_string(),
            ..FilterConfig::default()
        };
        assert_eq!(config.censor_char(), '#');

        let empty = FilterConfig {
            censor_character: String::new(),
            ..FilterConfig::default()
        };
        assert_eq!(empty.censor_char(), '*');
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = FilterConfig::from_yaml_str("forbidden-words: {not: [a, list").unwrap_err();
        assert!(matches!(err, ChatFilterError::ConfigParse(_)));
    }

    #[test]
    fn embedded_default_parses() {
        let config = FilterConfig::load_default().unwrap();
        assert!(!config.forbidden_words.is_empty());
        assert!(config.enable_logging);
    }
}
