//! EV range simulator library entry points.
//!
//! This crate holds the consumption-estimation and range-projection engine:
//! a speed-dependent consumption model, the short and long rolling windows of
//! recent samples, the statistics over those windows, and the session object
//! that applies charge edits and distance steps. Front ends (the CLI, tests)
//! should only depend on the items exported here.
//!

#![deny(warnings)]

pub mod buffer;
pub mod config;
pub mod constants;
pub mod consumption;
pub mod error;
pub mod output;
pub mod range;
pub mod simulator;
pub mod stats;
pub mod vehicle;

pub use buffer::{RollingBuffer, RollingWindows};
pub use config::{default_config_path, resolve_config_path, SimulatorConfig};
pub use consumption::{ConsumptionModel, SpeedTier, SpeedTierModel};
pub use error::{Error, Result};
pub use output::Readout;
pub use range::{
    estimate_range, project, wh_per_km_to_kwh_per_100, Projection, ProjectionSettings,
};
pub use simulator::{DriveSummary, Sample, Simulator};
pub use stats::{average, percentile};
pub use vehicle::{parse_capacity_input, VehicleState};
