//! Vehicle charge, capacity and odometer.

use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_CAPACITY_KWH, DEFAULT_STATE_OF_CHARGE, MAX_CAPACITY_KWH, MAX_STATE_OF_CHARGE,
    MIN_CAPACITY_KWH, MIN_STATE_OF_CHARGE, STEP_DISTANCE_KM,
};

/// Mutable vehicle state owned by a simulation session.
///
/// The state of charge always stays within `[0, 100]` and the capacity within
/// `[10, 200]` kWh; every mutation clamps. The odometer only moves forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleState {
    state_of_charge: f64,
    capacity_kwh: f64,
    odometer_km: u64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_OF_CHARGE, DEFAULT_CAPACITY_KWH)
    }
}

impl VehicleState {
    /// Create a state with the given charge and capacity, both clamped.
    pub fn new(state_of_charge: f64, capacity_kwh: f64) -> Self {
        let mut state = Self {
            state_of_charge: DEFAULT_STATE_OF_CHARGE,
            capacity_kwh: DEFAULT_CAPACITY_KWH,
            odometer_km: 0,
        };
        state.set_state_of_charge(state_of_charge);
        state.set_capacity(Some(capacity_kwh));
        state
    }

    pub fn state_of_charge(&self) -> f64 {
        self.state_of_charge
    }

    pub fn capacity_kwh(&self) -> f64 {
        self.capacity_kwh
    }

    pub fn odometer_km(&self) -> u64 {
        self.odometer_km
    }

    /// Set the state of charge, clamped to `[0, 100]`.
    ///
    /// A NaN input is ignored and the current charge is kept.
    pub fn set_state_of_charge(&mut self, percent: f64) {
        if percent.is_nan() {
            warn!("ignoring non-numeric state of charge");
            return;
        }
        self.state_of_charge = percent.clamp(MIN_STATE_OF_CHARGE, MAX_STATE_OF_CHARGE);
        debug!(soc = self.state_of_charge, "state of charge updated");
    }

    /// Set the battery capacity, clamped to `[10, 200]` kWh.
    ///
    /// Missing input, NaN and zero all fall back to the default capacity of
    /// 85 kWh before clamping.
    pub fn set_capacity(&mut self, kwh: Option<f64>) {
        let kwh = match kwh {
            Some(value) if !value.is_nan() && value != 0.0 => value,
            other => {
                debug!(input = ?other, "capacity input missing, using default");
                DEFAULT_CAPACITY_KWH
            }
        };
        self.capacity_kwh = kwh.clamp(MIN_CAPACITY_KWH, MAX_CAPACITY_KWH);
        debug!(capacity_kwh = self.capacity_kwh, "capacity updated");
    }

    /// Apply one simulation step of driving at `wh_per_km`.
    ///
    /// Returns the state-of-charge drop in percentage points before clamping.
    pub fn drive_step(&mut self, wh_per_km: f64) -> f64 {
        let kwh_used = wh_per_km * STEP_DISTANCE_KM as f64 / 1000.0;
        let soc_drop = (kwh_used / self.capacity_kwh) * 100.0;
        self.state_of_charge =
            (self.state_of_charge - soc_drop).clamp(MIN_STATE_OF_CHARGE, MAX_STATE_OF_CHARGE);
        self.odometer_km += STEP_DISTANCE_KM;
        soc_drop
    }

    /// Advance the odometer over distance driven with an empty battery.
    pub(crate) fn coast_empty(&mut self, km: u64) {
        debug_assert_eq!(self.state_of_charge, MIN_STATE_OF_CHARGE);
        self.odometer_km = self.odometer_km.saturating_add(km * STEP_DISTANCE_KM);
    }
}

/// Interpret free-form capacity input the way a number field would.
///
/// Surrounding whitespace is ignored; empty or unparsable text is treated as
/// missing.
///
/// # Examples
/// ```
/// use evrange_lib::parse_capacity_input;
///
/// assert_eq!(parse_capacity_input(" 75 "), Some(75.0));
/// assert_eq!(parse_capacity_input(""), None);
/// assert_eq!(parse_capacity_input("lots"), None);
/// ```
pub fn parse_capacity_input(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(input = trimmed, "capacity input is not a number");
            None
        }
    }
}
