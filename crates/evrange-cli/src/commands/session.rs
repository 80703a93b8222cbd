//! Session command handler: drive a simulator from stdin commands.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use evrange_cli::output::OutputFormat;
use evrange_cli::session::run_session;
use evrange_cli::terminal::ColorPalette;
use evrange_lib::{Simulator, SimulatorConfig};

/// Handle the session subcommand.
pub fn handle_session(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = SimulatorConfig::load(config_path)
        .context("failed to load simulator configuration")?;
    let mut sim = Simulator::from_config(&config).context("invalid simulator configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = run_session(
        &mut sim,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
        format,
        &ColorPalette::detect(),
    )?;

    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        odometer_km = sim.state().odometer_km(),
        "session ended"
    );
    Ok(())
}
