//! Subcommand implementations and the configuration lookup they share.

pub mod check;
pub mod init_config;
pub mod run;
pub mod validate;

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use chatfilter_core::config::{default_config_path, default_data_dir, FileConfigSource};
use chatfilter_core::{ConfigSource, FilterConfig};

/// Finds the configuration file each time it is loaded: the explicit path,
/// else the fallback file if it exists at that moment, else the embedded
/// defaults. A `reload` therefore picks up a config file created after start.
#[derive(Debug, Clone, Default)]
pub struct ConfigLookup {
    explicit: Option<PathBuf>,
    fallback: Option<PathBuf>,
}

impl ConfigLookup {
    pub fn new(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Self {
        Self { explicit, fallback }
    }

    /// The file source a load would use right now.
    pub fn resolve(&self) -> FileConfigSource {
        if let Some(path) = &self.explicit {
            return FileConfigSource::new(Some(path.clone()));
        }
        match &self.fallback {
            Some(path) if path.is_file() => {
                debug!("Using configuration at {}", path.display());
                FileConfigSource::new(Some(path.clone()))
            }
            _ => {
                debug!("No configuration file found, using embedded defaults.");
                FileConfigSource::new(None)
            }
        }
    }
}

impl ConfigSource for ConfigLookup {
    fn load(&self) -> Result<FilterConfig> {
        self.resolve().load()
    }
}

/// The lookup used by every subcommand, falling back to the per-user config file.
pub fn config_source(explicit: Option<PathBuf>) -> ConfigLookup {
    ConfigLookup::new(explicit, default_config_path())
}

/// The data directory: the explicit one, else the platform default.
pub fn data_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(default_data_dir)
}
