//! Range-estimation and trajectory tables.
//!
//! This is where configuration, unit profiles, the calculator, and the
//! stepper meet: inputs are converted to base units, the engine runs, and the
//! results are converted back to display units row by row.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculator::{checked_estimate_distance, projectile_energy, solve_zero_angle, CalculatorInputs};
use crate::config::{RangeConfig, TrajectoryConfig};
use crate::drag::{reference_table, ConfiguredDrag, TabulatedDrag};
use crate::drag_model::{DragModel, NoDrag, QuadraticDrag};
use crate::error::{BallisticsError, Result};
use crate::trajectory::{TrajectoryParameters, TrajectoryStepper};
use crate::units::UnitProfile;

/// One mil value and the distance at which each target size subtends it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRow {
    pub mil: u32,
    /// Distances in the length unit the target sizes were given in
    pub distances: Vec<f64>,
}

/// Mil-dot range table for a set of known target sizes.
pub fn range_table(config: &RangeConfig, target_sizes: &[f64]) -> Result<Vec<RangeRow>> {
    config.validate()?;

    let rows = (1..=config.range)
        .step_by(config.step as usize)
        .map(|mil| {
            let distances = target_sizes
                .iter()
                .map(|&size| checked_estimate_distance(size, f64::from(mil)))
                .collect::<Result<Vec<_>>>()?;
            Ok(RangeRow { mil, distances })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = rows.len(), targets = target_sizes.len(), "built range table");
    Ok(rows)
}

/// One row of a trajectory table, in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRow {
    pub distance: u32,
    pub time: f64,
    pub drop: f64,
    pub velocity: f64,
    pub energy: f64,
}

/// Engine inputs resolved from a [`TrajectoryConfig`], in base units.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySetup {
    pub calculator: CalculatorInputs,
    pub muzzle_velocity: f64,
    pub launch_angle: f64,
    pub drag: ConfiguredDrag,
}

impl TrajectorySetup {
    pub fn from_config(config: &TrajectoryConfig) -> Result<Self> {
        config.validate()?;
        let profile = config.profile();

        let calculator = CalculatorInputs {
            pressure: config.pressure() * profile.pressure_to_base,
            diameter: config.caliber() * profile.caliber_to_base,
            mass: config.weight() * profile.weight_to_base,
            barrel_length: config.barrel() * profile.barrel_to_base,
        };
        let muzzle_velocity = calculator.muzzle_velocity()?;
        let launch_angle = solve_zero_angle(
            profile.gravity,
            config.zero_distance * profile.distance_to_base,
            muzzle_velocity,
        )?;
        let drag = build_drag(config, profile, &calculator)?;

        info!(
            unit = %config.unit,
            muzzle_velocity = muzzle_velocity * profile.velocity_from_base,
            launch_angle,
            drag_model = %config.drag_model,
            "trajectory setup"
        );

        Ok(Self {
            calculator,
            muzzle_velocity,
            launch_angle,
            drag,
        })
    }
}

fn build_drag(
    config: &TrajectoryConfig,
    profile: &UnitProfile,
    calculator: &CalculatorInputs,
) -> Result<ConfiguredDrag> {
    let drag = match config.drag_model {
        DragModel::None => ConfiguredDrag::None(NoDrag),
        DragModel::Quadratic => ConfiguredDrag::Quadratic(QuadraticDrag::for_projectile(
            profile.air_density,
            config.drag_coefficient,
            calculator.diameter,
            calculator.mass,
        )),
        model @ (DragModel::G1 | DragModel::G7) => {
            let table = reference_table(model)
                .ok_or_else(|| BallisticsError::UnknownDragModel(model.to_string()))?;
            ConfiguredDrag::Tabulated(TabulatedDrag::for_projectile(
                table,
                profile.speed_of_sound,
                profile.air_density,
                calculator.diameter,
                calculator.mass,
            ))
        }
    };
    Ok(drag)
}

/// A computed trajectory table and the values it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryTable {
    pub headers: [&'static str; 5],
    /// Muzzle velocity in display units
    pub muzzle_velocity: f64,
    /// Launch angle in radians
    pub launch_angle: f64,
    pub rows: Vec<TrajectoryRow>,
}

/// Build a trajectory table at `0, step, 2·step, … ≤ range`.
///
/// If the projectile stalls before the last distance, the table ends at the
/// last reachable row.
pub fn trajectory_table(config: &TrajectoryConfig) -> Result<TrajectoryTable> {
    let setup = TrajectorySetup::from_config(config)?;
    let profile = config.profile();

    let mut stepper = TrajectoryStepper::new(TrajectoryParameters {
        g: profile.gravity,
        v0: setup.muzzle_velocity,
        theta: setup.launch_angle,
        drag: setup.drag,
    });

    let mut rows = Vec::with_capacity(config.row_count());
    for distance in (0..=config.range).step_by(config.step as usize) {
        let point = match stepper.step(f64::from(distance) * profile.distance_to_base) {
            Ok(point) => point,
            Err(BallisticsError::Stalled { horizontal_velocity, .. }) => {
                warn!(distance, horizontal_velocity, "projectile stalled, truncating table");
                break;
            }
            Err(e) => return Err(e),
        };

        rows.push(TrajectoryRow {
            distance,
            time: point.time,
            drop: point.drop * profile.drop_from_base,
            velocity: point.velocity * profile.velocity_from_base,
            energy: projectile_energy(point.velocity, setup.calculator.mass) * profile.energy_from_base,
        });
    }

    Ok(TrajectoryTable {
        headers: profile.trajectory_headers,
        muzzle_velocity: setup.muzzle_velocity * profile.velocity_from_base,
        launch_angle: setup.launch_angle,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;
    use approx::assert_relative_eq;

    #[test]
    fn test_range_table_rows() {
        let config = RangeConfig::default();
        let rows = range_table(&config, &[1.5, 6.0]).unwrap();
        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].mil, 1);
        assert_relative_eq!(rows[0].distances[0], 1500.0);
        assert_relative_eq!(rows[9].distances[0], 150.0);
        assert_relative_eq!(rows[9].distances[1], 600.0);
        assert_eq!(rows.last().unwrap().mil, 30);
    }

    #[test]
    fn test_range_table_step() {
        let config = RangeConfig {
            step: 5,
            range: 30,
            ..Default::default()
        };
        let mils: Vec<u32> = range_table(&config, &[1.0]).unwrap().iter().map(|r| r.mil).collect();
        assert_eq!(mils, vec![1, 6, 11, 16, 21, 26]);
    }

    #[test]
    fn test_range_table_empty_range() {
        let config = RangeConfig {
            range: 0,
            ..Default::default()
        };
        assert!(range_table(&config, &[1.0]).unwrap().is_empty());
    }

    #[test]
    fn test_range_table_huge_step_does_not_overflow() {
        let config = RangeConfig {
            step: u32::MAX / 2 + 1,
            range: u32::MAX,
            ..Default::default()
        };
        let mils: Vec<u32> = range_table(&config, &[1.0]).unwrap().iter().map(|r| r.mil).collect();
        assert_eq!(mils, vec![1, u32::MAX / 2 + 2]);
    }

    #[test]
    fn test_trajectory_table_row_count() {
        let config = TrajectoryConfig::default();
        let table = trajectory_table(&config).unwrap();
        assert_eq!(table.rows.len(), config.row_count());
        assert_eq!(table.rows[0].distance, 0);
        assert_eq!(table.rows[10].distance, 1000);
    }

    #[test]
    fn test_trajectory_table_first_row_is_muzzle() {
        let table = trajectory_table(&TrajectoryConfig::default()).unwrap();
        let muzzle = table.rows[0];
        assert_eq!(muzzle.time, 0.0);
        assert_eq!(muzzle.drop, 0.0);
        assert_relative_eq!(muzzle.velocity, table.muzzle_velocity, max_relative = 1e-12);
    }

    #[test]
    fn test_trajectory_table_time_and_drop_monotonic() {
        let table = trajectory_table(&TrajectoryConfig::default()).unwrap();
        for pair in table.rows.windows(2) {
            assert!(pair[1].time > pair[0].time);
            assert!(pair[1].drop <= pair[0].drop);
        }
        // drag slows the projectile over the first interval
        assert!(table.rows[1].velocity < table.rows[0].velocity);
        assert!(table.rows[1].energy < table.rows[0].energy);
    }

    #[test]
    fn test_zero_distance_raises_launch_angle() {
        let flat = trajectory_table(&TrajectoryConfig::default()).unwrap();
        let zeroed = trajectory_table(&TrajectoryConfig {
            zero_distance: 100.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(flat.launch_angle, 0.0);
        assert!(zeroed.launch_angle > 0.0);
        assert!(zeroed.rows[1].drop > flat.rows[1].drop);
    }

    #[test]
    fn test_vacuum_table_matches_closed_form() {
        let config = TrajectoryConfig {
            drag_model: DragModel::None,
            step: 1,
            range: 300,
            ..Default::default()
        };
        let table = trajectory_table(&config).unwrap();
        let last = table.rows.last().unwrap();
        let g = UnitSystem::Imperial.profile().gravity;
        let expected_drop_in = -0.5 * g * last.time.powi(2) * 12.0;
        assert_relative_eq!(last.drop, expected_drop_in, max_relative = 0.01);
        // no drag: speed only grows from the vertical component
        assert!(last.velocity >= table.muzzle_velocity);
    }

    #[test]
    fn test_si_table() {
        let config = TrajectoryConfig {
            unit: UnitSystem::Si,
            range: 500,
            ..Default::default()
        };
        let table = trajectory_table(&config).unwrap();
        assert_eq!(table.headers[0], "meters");
        assert_eq!(table.rows.len(), 6);
        assert!(table.rows[5].drop < 0.0);
    }

    #[test]
    fn test_tabulated_drag_table() {
        for model in [DragModel::G1, DragModel::G7] {
            let config = TrajectoryConfig {
                drag_model: model,
                range: 300,
                ..Default::default()
            };
            let table = trajectory_table(&config).unwrap();
            assert_eq!(table.rows.len(), 4);
            assert!(table.rows[3].velocity < table.muzzle_velocity);
        }
    }

    #[test]
    fn test_out_of_reach_zero() {
        let config = TrajectoryConfig {
            zero_distance: 1.0e7,
            ..Default::default()
        };
        assert!(matches!(
            trajectory_table(&config),
            Err(BallisticsError::ZeroOutOfReach { .. })
        ));
    }

    #[test]
    fn test_stall_truncates_table() {
        let config = TrajectoryConfig {
            drag_coefficient: 50.0,
            ..Default::default()
        };
        let table = trajectory_table(&config).unwrap();
        assert!(!table.rows.is_empty());
        assert!(table.rows.len() < config.row_count());
    }

    #[test]
    fn test_invalid_projectile_rejected() {
        let config = TrajectoryConfig {
            bullet_weight: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            trajectory_table(&config),
            Err(BallisticsError::InvalidInput(_))
        ));
    }
}
