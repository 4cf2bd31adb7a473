use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use serde::Serialize;

use confstore::cli::{Cli, Command, OutputFormat};
use confstore::{ConfigError, ConfigFile};

#[derive(Serialize)]
struct PairEntry<'a> {
    key: &'a str,
    value: &'a str,
}

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("confstore starting");

    match cli.command {
        Command::Get { file, key } => {
            let config = ConfigFile::load(&file)?;
            match config.get(&key) {
                Some(value) => println!("{}", value),
                None => return Err(eyre!("no pair found for key '{}'", key)),
            }
        }
        Command::Set { file, key, value } => {
            let mut config = match ConfigFile::load(&file) {
                Ok(config) => config,
                Err(ConfigError::NotFound(_)) => {
                    let mut fresh = ConfigFile::new();
                    fresh.set_path(&file);
                    fresh
                }
                Err(err) => return Err(err.into()),
            };
            config.set(&key, &value);
            config.save()?;
            println!("{} {} = {}", "✓".green(), key.cyan(), value);
        }
        Command::Unset { file, key } => {
            let mut config = ConfigFile::load(&file)?;
            match config.unset(&key) {
                Some(_) => {
                    config.save()?;
                    println!("{} removed {}", "✓".green(), key.cyan());
                }
                None => return Err(eyre!("no pair found for key '{}'", key)),
            }
        }
        Command::List { file, format } => {
            let config = ConfigFile::load(&file)?;
            match format {
                OutputFormat::Text => {
                    if config.is_empty() {
                        println!("No pairs found");
                    }
                    for (key, value) in config.iter() {
                        println!("{} {}", key.cyan(), value);
                    }
                }
                OutputFormat::Json => {
                    let pairs: Vec<PairEntry> = config
                        .iter()
                        .map(|(key, value)| PairEntry { key, value })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&pairs)?);
                }
            }
        }
    }

    Ok(())
}
