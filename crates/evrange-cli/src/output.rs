//! Output formatting for readouts, one-shot estimates and tier tables.

use clap::ValueEnum;
use serde::Serialize;

use evrange_lib::{wh_per_km_to_kwh_per_100, Readout, SpeedTierModel};

use crate::terminal::{supports_color, supports_unicode, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// One JSON document per result.
    Json,
}

/// Result of a one-shot range estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimateSummary {
    pub range_km: u32,
    pub wh_per_km: f64,
    pub kwh_per_100: f64,
}

/// Print the CLI logo banner.
pub fn print_logo() {
    let palette = ColorPalette::detect();
    let (orange, reset) = (palette.orange, palette.reset);

    if supports_unicode() {
        println!(
            "{orange}╭──────────────────────────────╮
│  EV RANGE SIMULATOR          │
╰──────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{orange}+------------------------------+
|  EV RANGE SIMULATOR          |
+------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let (gray, reset) = if supports_color() {
        (crate::terminal::colors::GRAY, crate::terminal::colors::RESET)
    } else {
        ("", "")
    };

    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{gray}Completed in {}{reset}", time_str);
}

/// Render a readout as a single text line.
///
/// With a plain palette this matches the readout's `Display` output.
pub fn render_readout(readout: &Readout, palette: &ColorPalette) -> String {
    format!(
        "{wb}{} km{r} | max {green}{} km{r} | min {red}{} km{r} | {cyan}{:.1} kWh/100{r} | SoC {} %",
        readout.normal_km,
        readout.max_km,
        readout.min_km,
        readout.kwh_per_100,
        readout.soc_percent,
        wb = palette.white_bold,
        green = palette.green,
        red = palette.red,
        cyan = palette.cyan,
        r = palette.reset,
    )
}

/// Render a one-shot estimate as text.
pub fn render_estimate(summary: &EstimateSummary, palette: &ColorPalette) -> String {
    format!(
        "{wb}{} km{r} at {cyan}{:.1} kWh/100{r}",
        summary.range_km,
        summary.kwh_per_100,
        wb = palette.white_bold,
        cyan = palette.cyan,
        r = palette.reset,
    )
}

/// Render the consumption tier table.
pub fn render_tiers(model: &SpeedTierModel) -> String {
    let mut lines = vec![
        "Consumption tiers:".to_string(),
        format!("{:<16} {:>8} {:>8}", "Speed (km/h)", "Wh/km", "kWh/100"),
    ];

    let mut lower: Option<f64> = None;
    for tier in &model.tiers {
        let band = match lower {
            Some(low) => format!("{low} - {}", tier.below_kmh),
            None => format!("< {}", tier.below_kmh),
        };
        lines.push(tier_row(&band, tier.wh_per_km));
        lower = Some(tier.below_kmh);
    }

    let top_band = match lower {
        Some(low) => format!(">= {low}"),
        None => "any".to_string(),
    };
    lines.push(tier_row(&top_band, model.top_wh_per_km));

    lines.join("\n")
}

fn tier_row(band: &str, wh_per_km: f64) -> String {
    format!(
        "{:<16} {:>8} {:>8.1}",
        band,
        wh_per_km,
        wh_per_km_to_kwh_per_100(wh_per_km)
    )
}

/// Serialize any result as a compact JSON line.
pub fn to_json_line<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evrange_lib::Simulator;

    #[test]
    fn plain_readout_matches_display() {
        let readout = Simulator::new().display();
        let rendered = render_readout(&readout, &ColorPalette::plain());
        assert_eq!(rendered, readout.to_string());
        assert_eq!(
            rendered,
            "378 km | max 378 km | min 378 km | 18.0 kWh/100 | SoC 80 %"
        );
    }

    #[test]
    fn colored_readout_wraps_figures() {
        let readout = Simulator::new().display();
        let rendered = render_readout(&readout, &ColorPalette::colored());
        assert!(rendered.contains("\x1b[32m378 km\x1b[0m"));
        assert!(rendered.contains("\x1b[36m18.0 kWh/100"));
    }

    #[test]
    fn renders_default_tier_table() {
        let table = render_tiers(&SpeedTierModel::default());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("< 60"));
        assert!(lines[2].contains("160"));
        assert!(lines[3].starts_with("60 - 110"));
        assert!(lines[3].ends_with("18.5"));
        assert!(lines[4].starts_with(">= 110"));
        assert!(lines[4].ends_with("22.0"));
    }

    #[test]
    fn estimate_json_fields() {
        let summary = EstimateSummary {
            range_km: 368,
            wh_per_km: 185.0,
            kwh_per_100: 18.5,
        };
        let json = to_json_line(&summary).expect("serialize");
        assert_eq!(
            json,
            r#"{"range_km":368,"wh_per_km":185.0,"kwh_per_100":18.5}"#
        );
        assert_eq!(
            render_estimate(&summary, &ColorPalette::plain()),
            "368 km at 18.5 kWh/100"
        );
    }
}
