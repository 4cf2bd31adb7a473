//! ConfStore - key/value configuration over plain text files
//!
//! A config file is a list of `key value` lines: the key is the first
//! whitespace-delimited token, the value is the trimmed remainder of the
//! line. Blank lines are skipped; a non-blank line without a value is a
//! parse error. Pairs keep their file order in memory and on save.
//!
//! # Usage
//!
//! ```rust,ignore
//! use confstore::ConfigFile;
//!
//! let mut config = ConfigFile::load("app.conf")?;
//! let level = config.get("log_level").unwrap_or("INFO");
//! config.set("max_batch", "16");
//! config.save()?;
//! ```

pub mod cli;
pub mod store;

pub use store::{ConfigError, ConfigFile};

/// File name used by convention when only a directory is known.
pub const DEFAULT_CONFIG_FILE: &str = "eventbus.conf";
