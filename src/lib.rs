//! # Ballistic Tables
//!
//! Muzzle velocity estimation and drag-aware trajectory tables.
//!
//! The engine is split in two: [`calculator`] holds closed-form formulas and
//! [`trajectory`] holds a stateful stepper queried at increasing distances.
//! Everything else ([`units`], [`config`], [`tables`]) converts between human
//! inputs and the plain magnitudes the engine works on.

// Re-export the main types and functions
pub use calculator::{
    checked_estimate_distance, estimate_distance, muzzle_velocity, projectile_acceleration,
    projectile_energy, solve_zero_angle, zero_angle, CalculatorInputs,
};
pub use config::{RangeConfig, TrajectoryConfig};
pub use drag::{ConfiguredDrag, DragTable, TabulatedDrag};
pub use drag_model::{DragFunction, DragModel, NoDrag, QuadraticDrag};
pub use error::{BallisticsError, Result};
pub use tables::{range_table, trajectory_table, RangeRow, TrajectoryRow, TrajectoryTable};
pub use trajectory::{TrajectoryParameters, TrajectoryPoint, TrajectoryStepper};
pub use units::{UnitProfile, UnitSystem};

// Module declarations
pub mod calculator;
pub mod config;
pub mod constants;
pub mod drag;
mod drag_model;
mod error;
pub mod tables;
pub mod trajectory;
pub mod units;
