//! Range estimation and the normal/optimistic/pessimistic projections.

use serde::{Deserialize, Serialize};

use crate::buffer::RollingWindows;
use crate::constants::{BASELINE_WH_PER_KM, OPTIMISTIC_PERCENTILE, PESSIMISTIC_PERCENTILE};
use crate::stats::{average, percentile};

/// Distance (km, rounded) reachable with the remaining energy at a given
/// consumption.
///
/// Formula: `round((soc / 100) * capacity_kwh * 1000 / wh_per_km)`.
///
/// Returns 0 when `wh_per_km` is not positive (or NaN) instead of dividing by
/// zero, and never returns a negative distance.
///
/// # Examples
/// ```
/// use evrange_lib::estimate_range;
///
/// assert_eq!(estimate_range(80.0, 85.0, 185.0), 368);
/// assert_eq!(estimate_range(80.0, 85.0, 0.0), 0);
/// ```
pub fn estimate_range(soc_percent: f64, capacity_kwh: f64, wh_per_km: f64) -> u32 {
    if wh_per_km.is_nan() || wh_per_km <= 0.0 {
        return 0;
    }
    let kwh_remaining = (soc_percent / 100.0) * capacity_kwh;
    // Float-to-int casts saturate, so negative or NaN results land on 0.
    ((kwh_remaining * 1000.0) / wh_per_km).round() as u32
}

/// Convert Wh/km into the display-friendly kWh/100 km.
pub fn wh_per_km_to_kwh_per_100(wh_per_km: f64) -> f64 {
    wh_per_km * 100.0 / 1000.0
}

/// Statistics parameters used to derive a [`Projection`] from the windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    /// Consumption assumed while the short window is empty.
    pub baseline_wh_per_km: f64,
    /// Long-window percentile driving the max-range figure.
    pub optimistic_percentile: f64,
    /// Long-window percentile driving the min-range figure.
    pub pessimistic_percentile: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            baseline_wh_per_km: BASELINE_WH_PER_KM,
            optimistic_percentile: OPTIMISTIC_PERCENTILE,
            pessimistic_percentile: PESSIMISTIC_PERCENTILE,
        }
    }
}

/// Normal, optimistic and pessimistic range figures along with the
/// consumption values that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub normal_km: u32,
    pub max_km: u32,
    pub min_km: u32,
    pub normal_wh_per_km: f64,
    pub optimistic_wh_per_km: f64,
    pub pessimistic_wh_per_km: f64,
}

/// Recompute the three range projections for the current charge.
///
/// The normal figure uses the short-window average (baseline when empty).
/// The max and min figures read the optimistic and pessimistic percentiles of
/// the long window, falling back to the normal consumption when it is empty.
pub fn project(
    soc_percent: f64,
    capacity_kwh: f64,
    windows: &RollingWindows,
    settings: &ProjectionSettings,
) -> Projection {
    let normal_wh_per_km = average(&windows.short.to_vec(), settings.baseline_wh_per_km);

    let long = windows.long.to_vec();
    let optimistic_wh_per_km = percentile(&long, settings.optimistic_percentile, normal_wh_per_km);
    let pessimistic_wh_per_km =
        percentile(&long, settings.pessimistic_percentile, normal_wh_per_km);

    Projection {
        normal_km: estimate_range(soc_percent, capacity_kwh, normal_wh_per_km),
        max_km: estimate_range(soc_percent, capacity_kwh, optimistic_wh_per_km),
        min_km: estimate_range(soc_percent, capacity_kwh, pessimistic_wh_per_km),
        normal_wh_per_km,
        optimistic_wh_per_km,
        pessimistic_wh_per_km,
    }
}
