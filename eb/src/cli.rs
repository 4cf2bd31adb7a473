//! CLI argument parsing for eb

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eb")]
#[command(author, version, about = "Deferred-dispatch event bus daemon", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR, SEVERE)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Number of demonstration events to trigger before pumping
    #[arg(short = 'n', long, default_value_t = 2)]
    pub events: usize,
}
