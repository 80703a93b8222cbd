//! Simulator configuration: initial session values, window sizes, projection
//! statistics and the consumption tier table.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    BASELINE_WH_PER_KM, DEFAULT_CAPACITY_KWH, DEFAULT_STATE_OF_CHARGE, LONG_WINDOW,
    OPTIMISTIC_PERCENTILE, PESSIMISTIC_PERCENTILE, SHORT_WINDOW,
};
use crate::consumption::SpeedTierModel;
use crate::error::{Error, Result};
use crate::range::ProjectionSettings;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "EVRANGE_CONFIG";

/// Filename looked up in the platform configuration directory.
const CONFIG_FILENAME: &str = "config.json";

/// Tunable simulator parameters. Every field is optional in JSON and falls
/// back to the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    pub initial_soc: f64,
    pub initial_capacity_kwh: f64,
    pub short_window: usize,
    pub long_window: usize,
    pub baseline_wh_per_km: f64,
    pub optimistic_percentile: f64,
    pub pessimistic_percentile: f64,
    pub consumption: SpeedTierModel,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_soc: DEFAULT_STATE_OF_CHARGE,
            initial_capacity_kwh: DEFAULT_CAPACITY_KWH,
            short_window: SHORT_WINDOW,
            long_window: LONG_WINDOW,
            baseline_wh_per_km: BASELINE_WH_PER_KM,
            optimistic_percentile: OPTIMISTIC_PERCENTILE,
            pessimistic_percentile: PESSIMISTIC_PERCENTILE,
            consumption: SpeedTierModel::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|err| Error::ConfigParse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded simulator configuration");
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration resolved by [`resolve_config_path`], or the
    /// defaults when no file applies.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit)? {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            (self.initial_soc, "initial_soc"),
            (self.initial_capacity_kwh, "initial_capacity_kwh"),
            (self.baseline_wh_per_km, "baseline_wh_per_km"),
            (self.optimistic_percentile, "optimistic_percentile"),
            (self.pessimistic_percentile, "pessimistic_percentile"),
        ];
        for (value, field) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidConfig {
                    message: format!("{field} must be finite, got {value}"),
                });
            }
        }

        if self.baseline_wh_per_km <= 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "baseline_wh_per_km must be positive, got {}",
                    self.baseline_wh_per_km
                ),
            });
        }

        for (value, field) in [
            (self.optimistic_percentile, "optimistic_percentile"),
            (self.pessimistic_percentile, "pessimistic_percentile"),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig {
                    message: format!("{field} must be between 0 and 1, got {value}"),
                });
            }
        }

        for (value, field) in [
            (self.short_window, "short_window"),
            (self.long_window, "long_window"),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig {
                    message: format!("{field} must hold at least one sample"),
                });
            }
        }

        self.consumption.validate()
    }

    pub fn projection_settings(&self) -> ProjectionSettings {
        ProjectionSettings {
            baseline_wh_per_km: self.baseline_wh_per_km,
            optimistic_percentile: self.optimistic_percentile,
            pessimistic_percentile: self.pessimistic_percentile,
        }
    }
}

/// Resolve the default configuration location using platform-specific
/// project directories.
pub fn default_config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "evrange", "evrange").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(CONFIG_FILENAME))
}

/// Pick the configuration file to load.
///
/// Order: the explicit path, then `EVRANGE_CONFIG`, then `config.json` in the
/// platform configuration directory. The first two must exist when given;
/// the platform file is optional and `None` is returned when it is absent.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return require_existing(path.to_path_buf()).map(Some);
    }

    if let Some(env_path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        debug!("using configuration from {}", CONFIG_ENV_VAR);
        return require_existing(PathBuf::from(env_path)).map(Some);
    }

    match default_config_path() {
        Ok(path) if path.exists() => Ok(Some(path)),
        Ok(_) | Err(Error::ProjectDirsUnavailable) => Ok(None),
        Err(err) => Err(err),
    }
}

fn require_existing(path: PathBuf) -> Result<PathBuf> {
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::ConfigNotFound { path })
    }
}
