use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::calculator::bore_area;
use crate::error::BallisticsError;

/// A drag law: maps the projectile's current speed to the magnitude of the
/// deceleration caused by air resistance.
///
/// The stepper takes any implementation, so quadratic, tabulated, or
/// caller-defined closures can be swapped without touching the integrator.
pub trait DragFunction {
    fn deceleration(&self, velocity: f64) -> f64;
}

impl<F> DragFunction for F
where
    F: Fn(f64) -> f64,
{
    fn deceleration(&self, velocity: f64) -> f64 {
        self(velocity)
    }
}

/// Vacuum flight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoDrag;

impl DragFunction for NoDrag {
    fn deceleration(&self, _velocity: f64) -> f64 {
        0.0
    }
}

/// Constant-coefficient quadratic drag: `0.5 · ρ · Cd · A · v² / m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticDrag {
    pub air_density: f64,
    pub drag_coefficient: f64,
    pub reference_area: f64,
    pub mass: f64,
}

impl QuadraticDrag {
    /// Build from a projectile diameter instead of a reference area.
    pub fn for_projectile(air_density: f64, drag_coefficient: f64, diameter: f64, mass: f64) -> Self {
        Self {
            air_density,
            drag_coefficient,
            reference_area: bore_area(diameter),
            mass,
        }
    }

    /// Collapsed constant `k` such that the deceleration is `k · v²`.
    pub fn factor(&self) -> f64 {
        0.5 * self.air_density * self.drag_coefficient * self.reference_area / self.mass
    }
}

impl DragFunction for QuadraticDrag {
    fn deceleration(&self, velocity: f64) -> f64 {
        self.factor() * velocity.powi(2)
    }
}

/// Drag model selector used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DragModel {
    /// No air resistance
    None,
    /// Constant drag coefficient
    #[default]
    Quadratic,
    /// G1 reference projectile (flat-base spitzer)
    G1,
    /// G7 reference projectile (boat-tail spitzer)
    G7,
}

impl DragModel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Some(DragModel::None),
            "QUADRATIC" => Some(DragModel::Quadratic),
            "G1" => Some(DragModel::G1),
            "G7" => Some(DragModel::G7),
            _ => None,
        }
    }
}

impl std::str::FromStr for DragModel {
    type Err = BallisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DragModel::from_str(s).ok_or_else(|| BallisticsError::UnknownDragModel(s.to_string()))
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DragModel::None => "none",
            DragModel::Quadratic => "quadratic",
            DragModel::G1 => "G1",
            DragModel::G7 => "G7",
        };
        write!(f, "{name}")
    }
}
