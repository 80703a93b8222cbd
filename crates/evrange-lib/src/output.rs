use std::fmt;

use serde::Serialize;

use crate::range::{wh_per_km_to_kwh_per_100, Projection};
use crate::vehicle::VehicleState;

/// Presentation-ready snapshot of a session.
///
/// Distances are whole kilometres, consumption is kWh/100 km rounded to one
/// decimal and the state of charge is rounded to a whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readout {
    pub normal_km: u32,
    pub max_km: u32,
    pub min_km: u32,
    pub kwh_per_100: f64,
    pub soc_percent: u32,
    pub odometer_km: u64,
}

impl Readout {
    /// Build a readout from a projection and the vehicle it was computed for.
    pub fn from_projection(projection: &Projection, vehicle: &VehicleState) -> Self {
        Self {
            normal_km: projection.normal_km,
            max_km: projection.max_km,
            min_km: projection.min_km,
            kwh_per_100: round_to(wh_per_km_to_kwh_per_100(projection.normal_wh_per_km), 1),
            soc_percent: vehicle.state_of_charge().round() as u32,
            odometer_km: vehicle.odometer_km(),
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} km | max {} km | min {} km | {:.1} kWh/100 | SoC {} %",
            self.normal_km, self.max_km, self.min_km, self.kwh_per_100, self.soc_percent
        )
    }
}

fn round_to(value: f64, decimal_places: i32) -> f64 {
    let factor = 10f64.powi(decimal_places);
    (value * factor).round() / factor
}
