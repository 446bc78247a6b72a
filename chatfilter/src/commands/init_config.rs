//! `chatfilter init-config`: write the default configuration to disk.

use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use chatfilter_core::config::DEFAULT_CONFIG_YAML;

/// Writes the default configuration to `path`, creating parent directories.
///
/// An existing file is left alone unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_YAML)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatfilter_core::FilterConfig;

    #[test]
    fn writes_loadable_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yml");
        write_default_config(&path, false).unwrap();
        assert_eq!(FilterConfig::load_from_file(&path).unwrap(), FilterConfig::load_default().unwrap());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "forbidden-words: [mine]").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "forbidden-words: [mine]");

        write_default_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_YAML);
    }
}
