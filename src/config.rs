//! Table configuration.
//!
//! Both configs deserialize from JSON using the same field names as the
//! command-line flags. Optional projectile fields fall back to the defaults of
//! the selected unit profile, so a file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drag_model::DragModel;
use crate::error::{BallisticsError, Result};
use crate::units::{UnitProfile, UnitSystem};

/// Settings for a mil-dot range estimation table.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeConfig {
    pub unit: UnitSystem,
    /// Mils between rows
    pub step: u32,
    /// Largest mil value
    pub range: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            unit: UnitSystem::Imperial,
            step: 1,
            range: 30,
        }
    }
}

impl RangeConfig {
    /// Profile used to parse target sizes and format distances.
    pub fn profile(&self) -> &'static UnitProfile {
        self.unit.profile()
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(BallisticsError::InvalidConfig("step must be at least 1".into()));
        }
        Ok(())
    }
}

/// Settings for a trajectory table.
///
/// Projectile values are in the input units of `unit` (see
/// [`crate::units`]); distances are in yards for imperial and meters for SI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub unit: UnitSystem,

    pub bullet_caliber: Option<f64>,
    pub bullet_weight: Option<f64>,
    pub cartridge_pressure: Option<f64>,
    pub barrel_length: Option<f64>,

    /// Distance at which the trajectory crosses the line of sight; 0 for a
    /// flat launch
    pub zero_distance: f64,
    pub drag_model: DragModel,
    /// Drag coefficient used by the quadratic model
    pub drag_coefficient: f64,

    /// Distance between rows
    pub step: u32,
    /// Largest distance
    pub range: u32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            unit: UnitSystem::Imperial,
            bullet_caliber: None,
            bullet_weight: None,
            cartridge_pressure: None,
            barrel_length: None,
            zero_distance: 0.0,
            drag_model: DragModel::Quadratic,
            drag_coefficient: 0.2,
            step: 100,
            range: 1000,
        }
    }
}

impl TrajectoryConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn profile(&self) -> &'static UnitProfile {
        self.unit.profile()
    }

    pub fn caliber(&self) -> f64 {
        self.bullet_caliber.unwrap_or(self.profile().default_caliber)
    }

    pub fn weight(&self) -> f64 {
        self.bullet_weight.unwrap_or(self.profile().default_weight)
    }

    pub fn pressure(&self) -> f64 {
        self.cartridge_pressure.unwrap_or(self.profile().default_pressure)
    }

    pub fn barrel(&self) -> f64 {
        self.barrel_length.unwrap_or(self.profile().default_barrel_length)
    }

    /// Number of rows the table will hold if the projectile never stalls.
    pub fn row_count(&self) -> usize {
        (self.range / self.step.max(1)) as usize + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(BallisticsError::InvalidConfig("step must be at least 1".into()));
        }
        if !self.zero_distance.is_finite() || self.zero_distance < 0.0 {
            return Err(BallisticsError::InvalidConfig(format!(
                "zero distance must be non-negative, got {}",
                self.zero_distance
            )));
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(BallisticsError::InvalidConfig(format!(
                "drag coefficient must be non-negative, got {}",
                self.drag_coefficient
            )));
        }
        Ok(())
    }
}
