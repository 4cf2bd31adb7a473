//! CLI argument parsing for confstore

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cf")]
#[command(author, version, about = "Key/value config store over plain text files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored for a key
    Get {
        /// Path to the config file
        #[arg(required = true)]
        file: PathBuf,

        /// Key to look up
        #[arg(required = true)]
        key: String,
    },

    /// Set a key, creating the file if needed
    Set {
        /// Path to the config file
        #[arg(required = true)]
        file: PathBuf,

        /// Key to set
        #[arg(required = true)]
        key: String,

        /// Value to store
        #[arg(required = true)]
        value: String,
    },

    /// Remove a key
    Unset {
        /// Path to the config file
        #[arg(required = true)]
        file: PathBuf,

        /// Key to remove
        #[arg(required = true)]
        key: String,
    },

    /// List all pairs
    List {
        /// Path to the config file
        #[arg(required = true)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
