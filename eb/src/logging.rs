//! Logging setup for the eb binary
//!
//! Installs a console sink always and a file sink when configured, with
//! level priority: CLI `--log-level`, then config file, then INFO.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Map a level name to a tracing level.
///
/// SEVERE is accepted as an alias for ERROR; unknown names fall back to
/// INFO with a warning on stderr, since logging is not up yet.
fn parse_level(name: &str) -> tracing::Level {
    match name.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" | "SEVERE" => tracing::Level::ERROR,
        other => {
            eprintln!("Warning: unknown log-level '{other}', defaulting to INFO");
            tracing::Level::INFO
        }
    }
}

/// Install the global tracing subscriber.
pub fn setup_logging(
    cli_level: Option<&str>,
    config_level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let level = cli_level
        .or(config_level)
        .map(parse_level)
        .unwrap_or(tracing::Level::INFO);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).context("Failed to create log directory")?;
                }
            }
            let file = File::create(path).context("Failed to create log file")?;
            Some(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    info!("Logging initialised (level: {:?})", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("trace"), tracing::Level::TRACE);
        assert_eq!(parse_level("DEBUG"), tracing::Level::DEBUG);
        assert_eq!(parse_level("Warning"), tracing::Level::WARN);
        assert_eq!(parse_level("ERROR"), tracing::Level::ERROR);
    }

    #[test]
    fn test_severe_is_an_error_alias() {
        assert_eq!(parse_level("SEVERE"), tracing::Level::ERROR);
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        assert_eq!(parse_level("verbose"), tracing::Level::INFO);
    }
}
