//! Estimate command handler for one-shot range figures.

use anyhow::Result;

use evrange_cli::output::{render_estimate, to_json_line, EstimateSummary, OutputFormat};
use evrange_cli::terminal::ColorPalette;
use evrange_lib::{estimate_range, wh_per_km_to_kwh_per_100};

/// Handle the estimate subcommand.
///
/// Reports the range for the given charge, capacity and consumption without
/// creating a session, so no clamping is applied to the inputs.
pub fn handle_estimate(
    soc_percent: f64,
    capacity_kwh: f64,
    wh_per_km: f64,
    format: OutputFormat,
) -> Result<()> {
    let summary = EstimateSummary {
        range_km: estimate_range(soc_percent, capacity_kwh, wh_per_km),
        wh_per_km,
        kwh_per_100: wh_per_km_to_kwh_per_100(wh_per_km),
    };

    match format {
        OutputFormat::Text => println!("{}", render_estimate(&summary, &ColorPalette::detect())),
        OutputFormat::Json => println!("{}", to_json_line(&summary)?),
    }
    Ok(())
}
