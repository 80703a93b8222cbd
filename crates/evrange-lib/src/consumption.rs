//! Speed-dependent energy consumption model.
//!
//! The model is a coarse, monotone step curve: faster driving costs more
//! energy per kilometre. It is not a physical model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maps an instantaneous speed to an energy-per-distance figure.
pub trait ConsumptionModel {
    /// Energy consumed per kilometre (Wh/km) when driving at `speed_kmh`.
    ///
    /// Implementations must be deterministic and return a strictly positive
    /// value for every input.
    fn estimate(&self, speed_kmh: f64) -> f64;
}

/// One tier of a [`SpeedTierModel`]: speeds strictly below `below_kmh`
/// consume `wh_per_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeedTier {
    pub below_kmh: f64,
    pub wh_per_km: f64,
}

/// Step-function consumption model.
///
/// Tiers are evaluated in ascending order and the first tier whose upper
/// bound exceeds the speed wins. Speeds at or above every bound use
/// `top_wh_per_km`.
///
/// # Examples
/// ```
/// use evrange_lib::{ConsumptionModel, SpeedTierModel};
///
/// let model = SpeedTierModel::default();
/// assert_eq!(model.estimate(50.0), 160.0);
/// assert_eq!(model.estimate(60.0), 185.0);
/// assert_eq!(model.estimate(110.0), 220.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedTierModel {
    pub tiers: Vec<SpeedTier>,
    pub top_wh_per_km: f64,
}

impl Default for SpeedTierModel {
    fn default() -> Self {
        Self {
            tiers: vec![
                SpeedTier {
                    below_kmh: 60.0,
                    wh_per_km: 160.0,
                },
                SpeedTier {
                    below_kmh: 110.0,
                    wh_per_km: 185.0,
                },
            ],
            top_wh_per_km: 220.0,
        }
    }
}

impl SpeedTierModel {
    /// Build a validated model from a tier table and a top-tier value.
    pub fn new(tiers: Vec<SpeedTier>, top_wh_per_km: f64) -> Result<Self> {
        let model = Self {
            tiers,
            top_wh_per_km,
        };
        model.validate()?;
        Ok(model)
    }

    /// Validate the tier table.
    ///
    /// Bounds must be finite and strictly ascending, and every consumption
    /// value must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let mut previous_bound = f64::NEG_INFINITY;
        for (index, tier) in self.tiers.iter().enumerate() {
            if !tier.below_kmh.is_finite() {
                return Err(Error::InvalidTiers {
                    message: format!(
                        "tier {index} bound must be finite, got {}",
                        tier.below_kmh
                    ),
                });
            }
            if tier.below_kmh <= previous_bound {
                return Err(Error::InvalidTiers {
                    message: format!(
                        "tier bounds must be strictly ascending, got {} after {}",
                        tier.below_kmh, previous_bound
                    ),
                });
            }
            check_positive(tier.wh_per_km, &format!("tier {index} wh_per_km"))?;
            previous_bound = tier.below_kmh;
        }

        check_positive(self.top_wh_per_km, "top_wh_per_km")
    }
}

fn check_positive(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidTiers {
            message: format!("{field} must be a finite positive number, got {value}"),
        });
    }
    Ok(())
}

impl ConsumptionModel for SpeedTierModel {
    fn estimate(&self, speed_kmh: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| speed_kmh < tier.below_kmh)
            .map(|tier| tier.wh_per_km)
            .unwrap_or(self.top_wh_per_km)
    }
}
