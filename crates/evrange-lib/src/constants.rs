//! Constants shared by the consumption model, the rolling windows and the
//! range projections.

/// State of charge of a fresh session, in percent.
pub const DEFAULT_STATE_OF_CHARGE: f64 = 80.0;

/// Usable battery capacity of a fresh session, and the substitute for missing
/// or unparsable capacity input, in kWh.
pub const DEFAULT_CAPACITY_KWH: f64 = 85.0;

/// Accepted capacity range in kWh. Edits are clamped into it.
pub const MIN_CAPACITY_KWH: f64 = 10.0;
pub const MAX_CAPACITY_KWH: f64 = 200.0;

/// Accepted state-of-charge range in percent.
pub const MIN_STATE_OF_CHARGE: f64 = 0.0;
pub const MAX_STATE_OF_CHARGE: f64 = 100.0;

/// Number of samples kept for the "normal" (recent average) projection.
pub const SHORT_WINDOW: usize = 5;

/// Number of samples kept for the percentile-based projections.
pub const LONG_WINDOW: usize = 50;

/// Consumption assumed before any sample has been recorded, in Wh/km.
pub const BASELINE_WH_PER_KM: f64 = 180.0;

/// Percentile of the long window read for the optimistic (max range) figure.
///
/// A low consumption percentile yields the longest range, so the optimistic
/// projection reads the low end of the distribution and the pessimistic one
/// reads the high end.
pub const OPTIMISTIC_PERCENTILE: f64 = 0.20;

/// Percentile of the long window read for the pessimistic (min range) figure.
pub const PESSIMISTIC_PERCENTILE: f64 = 0.80;

/// Distance covered by one simulation step, in km.
pub const STEP_DISTANCE_KM: u64 = 1;
