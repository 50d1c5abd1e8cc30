use serde::{Deserialize, Serialize};

use crate::error::{Result, XrayDbError};

/// What to do with an energy outside a table's tabulated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRange {
    /// Extend the nearest segment beyond the table.
    #[default]
    Extrapolate,
    /// Evaluate at the nearest tabulated boundary instead.
    Clamp,
    /// Fail with `XrayDbError::OutOfDomain`.
    Reject,
}

/// Engine settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub elam_out_of_range: OutOfRange,
    pub chantler_out_of_range: OutOfRange,
    /// Smallest value allowed before taking a logarithm of tabulated f″ or μ.
    pub log_floor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elam_out_of_range: OutOfRange::Extrapolate,
            chantler_out_of_range: OutOfRange::Extrapolate,
            log_floor: 1e-99,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// `log_floor` must be finite and positive, or zero f″ would reach `ln`.
    pub fn validate(&self) -> Result<()> {
        if !(self.log_floor.is_finite() && self.log_floor > 0.0) {
            return Err(XrayDbError::InvalidSetting {
                field: "log_floor",
                reason: format!("{} is not a finite positive number", self.log_floor),
            });
        }
        Ok(())
    }
}
