use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evrange_cli::output::{print_footer, print_logo, OutputFormat};

mod commands;

use commands::drive::{handle_drive, DriveOptions};
use commands::estimate::handle_estimate;
use commands::session::handle_session;
use commands::tiers::handle_tiers;

#[derive(Parser, Debug)]
#[command(author, version, about = "EV range simulator")]
struct Cli {
    /// Path to a JSON configuration file (overrides EVRANGE_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner and footer.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the range for a charge level, capacity and consumption.
    Estimate {
        /// State of charge in percent.
        #[arg(long)]
        soc: f64,
        /// Battery capacity in kWh.
        #[arg(long)]
        capacity: f64,
        /// Consumption in Wh/km.
        #[arg(long = "wh-per-km")]
        wh_per_km: f64,
    },
    /// Drive a number of kilometres at constant speed and show the projections.
    Drive {
        /// Speed in km/h.
        #[arg(long)]
        speed: f64,
        /// Distance to drive, in whole kilometres.
        #[arg(long, default_value_t = 1)]
        km: u32,
        /// Starting state of charge in percent.
        #[arg(long, allow_negative_numbers = true)]
        soc: Option<f64>,
        /// Battery capacity in kWh; invalid values fall back to 85.
        #[arg(long, allow_negative_numbers = true)]
        capacity: Option<String>,
    },
    /// Read session commands from stdin (soc, capacity, step, reset, show, quit).
    Session,
    /// List the consumption tiers in use.
    Tiers,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let decorate = !cli.no_logo
        && cli.format == OutputFormat::Text
        && !matches!(cli.command, Command::Session);
    if decorate {
        print_logo();
    }
    let started = Instant::now();

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Estimate {
            soc,
            capacity,
            wh_per_km,
        } => handle_estimate(soc, capacity, wh_per_km, cli.format)?,
        Command::Drive {
            speed,
            km,
            soc,
            capacity,
        } => handle_drive(
            config_path,
            &DriveOptions {
                speed_kmh: speed,
                km,
                soc,
                capacity,
            },
            cli.format,
        )?,
        Command::Session => handle_session(config_path, cli.format)?,
        Command::Tiers => handle_tiers(config_path, cli.format)?,
    }

    if decorate {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
