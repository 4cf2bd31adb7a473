//! eb - event bus demonstration daemon
//!
//! Entry point wiring: config store, logging, one demonstration
//! subscription, a trigger burst, and a single pump.

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use eventbus::cli::Cli;
use eventbus::config::AppConfig;
use eventbus::events::{EventBus, EventId, Payload};
use eventbus::logging::setup_logging;

/// Topic the demonstration subscription listens on.
const DEMO_EVENT_ID: EventId = 1;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(
        cli.log_level.as_deref(),
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    )
    .context("Failed to setup logging")?;

    debug!(?config, "configuration loaded");

    let bus = EventBus::with_config(config.bus_config());

    let handle = bus.subscribe(DEMO_EVENT_ID, |id: EventId, payload: &Payload| {
        info!(
            event_id = id,
            payload = %String::from_utf8_lossy(payload.as_bytes()),
            "demo subscriber called"
        );
        Ok(())
    })?;
    debug!(handle, "demo subscription registered");

    for n in 0..cli.events {
        bus.trigger(DEMO_EVENT_ID, format!("demo event {n}"))?;
    }

    let report = bus.process()?;
    info!(
        processed = report.processed,
        failures = report.callback_failures,
        "pump complete"
    );
    println!("processed {} event(s)", report.processed);

    bus.close()?;
    Ok(())
}
