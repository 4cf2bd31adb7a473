//! Core ConfigFile implementation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

/// Errors from config operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A non-blank line did not contain both a key and a value.
    #[error("malformed config file {path} at line {line}")]
    Invalid { path: PathBuf, line: usize },

    /// Save was called on a config with no associated path.
    #[error("config has no associated file path")]
    MissingPath,

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// In-memory key/value config backed by a `key value` text file.
///
/// Pairs keep their insertion order. `get` returns the first match, so
/// when a loaded file defines a key twice the earliest definition wins.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    pairs: Vec<(String, String)>,
}

impl ConfigFile {
    /// Create an empty config with no associated file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };

        let mut config = Self {
            path: Some(path.to_path_buf()),
            pairs: Vec::new(),
        };

        for (number, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = split_pair(line) else {
                return Err(ConfigError::Invalid {
                    path: path.to_path_buf(),
                    line: number + 1,
                });
            };
            debug!("found pair at line {}: {} = {}", number + 1, key, value);
            config.pairs.push((key.to_string(), value.to_string()));
        }

        debug!("loaded {} pair(s) from {}", config.pairs.len(), path.display());
        Ok(config)
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, replacing an existing pair in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        debug!("pair set {} = {}", key, value);
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Remove `key`. Returns the previous value if one existed.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        let pos = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(pos).1)
    }

    /// Associate the config with a file path for later saves.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Path this config loads from and saves to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the pairs back to the associated path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::MissingPath)?;
        self.save_to(path)
    }

    /// Write the pairs to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            out.push_str(key);
            out.push(' ');
            out.push_str(value);
            out.push('\n');
        }
        fs::write(path.as_ref(), out)?;
        debug!("saved {} pair(s) to {}", self.pairs.len(), path.as_ref().display());
        Ok(())
    }

    /// Number of pairs held.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(char::is_whitespace)?;
    let value = rest.trim();
    if value.is_empty() { None } else { Some((key, value)) }
}
