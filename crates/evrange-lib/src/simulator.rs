//! Simulation session: the command interface used by front ends.

use serde::Serialize;
use tracing::debug;

use crate::buffer::{RollingBuffer, RollingWindows};
use crate::config::SimulatorConfig;
use crate::consumption::{ConsumptionModel, SpeedTierModel};
use crate::error::Result;
use crate::output::Readout;
use crate::range::{project, Projection, ProjectionSettings};
use crate::vehicle::{parse_capacity_input, VehicleState};

/// Consumption recorded for one simulated kilometre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub speed_kmh: f64,
    pub wh_per_km: f64,
    pub soc_drop: f64,
}

/// Totals for a multi-kilometre drive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriveSummary {
    pub km: u32,
    pub total_wh: f64,
    pub final_soc: f64,
}

/// One driving session.
///
/// Owns the vehicle state, both rolling windows and the consumption model.
/// All mutation goes through the command methods; projections are computed
/// on demand from the current state.
///
/// # Examples
/// ```
/// use evrange_lib::Simulator;
///
/// let mut sim = Simulator::new();
/// sim.step(100.0);
/// let readout = sim.display();
/// assert_eq!(readout.normal_km, 367);
/// assert_eq!(readout.kwh_per_100, 18.5);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<M = SpeedTierModel> {
    vehicle: VehicleState,
    windows: RollingWindows,
    model: M,
    settings: ProjectionSettings,
}

impl Default for Simulator<SpeedTierModel> {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator<SpeedTierModel> {
    /// Session with the built-in defaults: 80 % of 85 kWh, windows of 5 and
    /// 50 samples, three-tier consumption model.
    pub fn new() -> Self {
        Self::with_model(SpeedTierModel::default(), &SimulatorConfig::default())
    }

    /// Session built from a validated configuration.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_model(config.consumption.clone(), config))
    }
}

impl<M: ConsumptionModel> Simulator<M> {
    /// Session using a custom consumption model. The tier table in `config`
    /// is ignored.
    pub fn with_model(model: M, config: &SimulatorConfig) -> Self {
        Self {
            vehicle: VehicleState::new(config.initial_soc, config.initial_capacity_kwh),
            windows: RollingWindows::new(config.short_window, config.long_window),
            model,
            settings: config.projection_settings(),
        }
    }

    /// Set the state of charge in percent, clamped to `[0, 100]`.
    pub fn set_state_of_charge(&mut self, percent: f64) {
        self.vehicle.set_state_of_charge(percent);
    }

    /// Set the capacity in kWh. Missing or invalid input uses 85 kWh; the
    /// result is clamped to `[10, 200]`.
    pub fn set_capacity(&mut self, kwh: Option<f64>) {
        self.vehicle.set_capacity(kwh);
    }

    /// Set the capacity from raw text input.
    pub fn set_capacity_input(&mut self, input: &str) {
        self.vehicle.set_capacity(parse_capacity_input(input));
    }

    /// Simulate one kilometre at `speed_kmh`.
    pub fn step(&mut self, speed_kmh: f64) -> Sample {
        let wh_per_km = self.model.estimate(speed_kmh);
        let soc_drop = self.vehicle.drive_step(wh_per_km);
        self.windows.push(wh_per_km);

        debug!(
            speed_kmh,
            wh_per_km,
            soc = self.vehicle.state_of_charge(),
            odometer_km = self.vehicle.odometer_km(),
            "simulated step"
        );

        Sample {
            speed_kmh,
            wh_per_km,
            soc_drop,
        }
    }

    /// Simulate `km` consecutive steps at a constant speed.
    ///
    /// Runs in constant memory. Once the battery is empty and both windows
    /// hold only this speed's consumption, further steps cannot change
    /// anything but the odometer, so the remainder is applied in one go.
    pub fn drive(&mut self, speed_kmh: f64, km: u32) -> DriveSummary {
        let saturated_after = self.windows.short.capacity().max(self.windows.long.capacity());
        let mut summary = DriveSummary {
            km,
            total_wh: 0.0,
            final_soc: self.vehicle.state_of_charge(),
        };

        for done in 0..km {
            if done as usize >= saturated_after && self.vehicle.state_of_charge() == 0.0 {
                let remaining = km - done;
                let wh_per_km = self.model.estimate(speed_kmh);
                self.vehicle.coast_empty(u64::from(remaining));
                summary.total_wh += wh_per_km * f64::from(remaining);
                debug!(remaining_km = remaining, "battery empty, odometer advanced");
                break;
            }
            summary.total_wh += self.step(speed_kmh).wh_per_km;
        }

        summary.final_soc = self.vehicle.state_of_charge();
        summary
    }

    /// Clear both consumption windows. Charge, capacity and odometer are kept.
    pub fn reset(&mut self) {
        self.windows.reset();
        debug!("consumption windows cleared");
    }

    /// Current normal/optimistic/pessimistic projection.
    pub fn projection(&self) -> Projection {
        project(
            self.vehicle.state_of_charge(),
            self.vehicle.capacity_kwh(),
            &self.windows,
            &self.settings,
        )
    }

    /// Presentation-ready snapshot of the session.
    pub fn display(&self) -> Readout {
        Readout::from_projection(&self.projection(), &self.vehicle)
    }

    pub fn state(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn short_window(&self) -> &RollingBuffer {
        &self.windows.short
    }

    pub fn long_window(&self) -> &RollingBuffer {
        &self.windows.long
    }
}
