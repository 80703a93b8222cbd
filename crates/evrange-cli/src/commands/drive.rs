//! Drive command handler: run a constant-speed trip and report the readout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use evrange_cli::output::{render_readout, to_json_line, OutputFormat};
use evrange_cli::terminal::ColorPalette;
use evrange_lib::{Simulator, SimulatorConfig};

/// Options for the drive subcommand.
#[derive(Debug, Clone)]
pub struct DriveOptions {
    pub speed_kmh: f64,
    pub km: u32,
    pub soc: Option<f64>,
    pub capacity: Option<String>,
}

/// Handle the drive subcommand.
pub fn handle_drive(
    config_path: Option<&Path>,
    options: &DriveOptions,
    format: OutputFormat,
) -> Result<()> {
    let config = SimulatorConfig::load(config_path)
        .context("failed to load simulator configuration")?;
    let mut sim = Simulator::from_config(&config).context("invalid simulator configuration")?;

    if let Some(soc) = options.soc {
        sim.set_state_of_charge(soc);
    }
    if let Some(capacity) = options.capacity.as_deref() {
        sim.set_capacity_input(capacity);
    }

    let trip = sim.drive(options.speed_kmh, options.km);
    info!(
        km = trip.km,
        speed_kmh = options.speed_kmh,
        total_kwh = trip.total_wh / 1000.0,
        final_soc = trip.final_soc,
        "trip simulated"
    );

    let readout = sim.display();
    match format {
        OutputFormat::Text => {
            println!(
                "After {} km at {} km/h (odometer {} km):",
                options.km,
                options.speed_kmh,
                readout.odometer_km
            );
            println!("{}", render_readout(&readout, &ColorPalette::detect()));
        }
        OutputFormat::Json => println!("{}", to_json_line(&readout)?),
    }
    Ok(())
}
