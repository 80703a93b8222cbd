//! Tiers command handler for listing the active consumption model.

use std::path::Path;

use anyhow::{Context, Result};

use evrange_cli::output::{render_tiers, to_json_line, OutputFormat};
use evrange_lib::SimulatorConfig;

/// Handle the tiers subcommand.
pub fn handle_tiers(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = SimulatorConfig::load(config_path)
        .context("failed to load simulator configuration")?;
    match format {
        OutputFormat::Text => println!("{}", render_tiers(&config.consumption)),
        OutputFormat::Json => println!("{}", to_json_line(&config.consumption)?),
    }
    Ok(())
}
