//! Bootstrap configuration for the eb binary
//!
//! Settings come from a confstore `key value` file. Search order: the
//! `--config` flag, then the user config directory, then the working
//! directory. A missing file is generated with defaults; an invalid one
//! aborts startup.
//!
//! Recognised keys: `log_level`, `log_file`, `max_batch`.

use std::fs;
use std::path::{Path, PathBuf};

use confstore::{ConfigError, ConfigFile, DEFAULT_CONFIG_FILE};
use eyre::{Context, Result};

use crate::events::BusConfig;

/// Settings the eb binary reads at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Log level name (TRACE, DEBUG, INFO, WARN, ERROR, SEVERE).
    pub log_level: Option<String>,
    /// File sink for logs, in addition to the console.
    pub log_file: Option<PathBuf>,
    /// Batch cap for a single `process` call. 0 disables the cap.
    pub max_batch: Option<usize>,
}

impl AppConfig {
    /// Load settings, generating a default config file if none exists.
    pub fn load(explicit: Option<&PathBuf>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.clone(),
            None => default_locations()
                .into_iter()
                .find(|candidate| candidate.exists())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let file = match ConfigFile::load(&path) {
            Ok(file) => file,
            Err(ConfigError::NotFound(_)) => create_default(&path)?,
            Err(err) => return Err(err).context("config file is invalid"),
        };

        Self::from_file(&file)
    }

    fn from_file(file: &ConfigFile) -> Result<Self> {
        let max_batch = match file.get("max_batch") {
            Some(raw) => {
                let cap: usize = raw
                    .parse()
                    .with_context(|| format!("max_batch must be a non-negative integer, got '{raw}'"))?;
                // 0 means uncapped
                (cap > 0).then_some(cap)
            }
            None => None,
        };

        Ok(Self {
            log_level: file.get("log_level").map(str::to_string),
            log_file: file.get("log_file").map(PathBuf::from),
            max_batch,
        })
    }

    /// Bus configuration derived from these settings.
    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            max_batch: self.max_batch,
        }
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("eventbus").join(DEFAULT_CONFIG_FILE));
    }
    paths.push(PathBuf::from(DEFAULT_CONFIG_FILE));
    paths
}

fn create_default(path: &Path) -> Result<ConfigFile> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    let mut file = ConfigFile::new();
    file.set("log_level", "INFO");
    file.set_path(path);
    file.save().context("Failed to write default config")?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_reads_known_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventbus.conf");
        fs::write(&path, "log_level DEBUG\nlog_file /tmp/eb.log\nmax_batch 16\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.log_file.as_deref(), Some(Path::new("/tmp/eb.log")));
        assert_eq!(config.max_batch, Some(16));
        assert_eq!(config.bus_config().max_batch, Some(16));
    }

    #[test]
    fn test_zero_max_batch_means_uncapped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventbus.conf");
        fs::write(&path, "max_batch 0\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.max_batch, None);
    }

    #[test]
    fn test_non_numeric_max_batch_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventbus.conf");
        fs::write(&path, "max_batch lots\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("eventbus.conf");

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.log_level.as_deref(), Some("INFO"));
        assert_eq!(config.max_batch, None);
    }

    #[test]
    fn test_malformed_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventbus.conf");
        fs::write(&path, "log_level\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
