//! Closed-form ballistic formulas.
//!
//! Every function here works on plain `f64` magnitudes that the caller has
//! already expressed in one consistent unit system (see [`crate::units`]).
//! The plain forms never fail: a zero mass or zero mil reading produces an
//! infinity, and a negative radicand produces NaN. The `checked_*` and
//! [`CalculatorInputs::validate`] companions reject those inputs up front.

use std::f64::consts::PI;

use tracing::debug;

use crate::constants::MILS_PER_UNIT_SUBTENSION;
use crate::error::{BallisticsError, Result};

/// Mil-dot range estimate: `target_size * 1000 / mils`.
///
/// The result shares the length unit of `target_size`. `mils == 0` yields
/// an infinite distance.
pub fn estimate_distance(target_size: f64, mils: f64) -> f64 {
    target_size * MILS_PER_UNIT_SUBTENSION / mils
}

/// Same as [`estimate_distance`] but rejects readings that cannot produce a
/// finite distance.
pub fn checked_estimate_distance(target_size: f64, mils: f64) -> Result<f64> {
    if mils == 0.0 || !mils.is_finite() {
        return Err(BallisticsError::InvalidInput(format!(
            "mil reading must be finite and non-zero, got {mils}"
        )));
    }
    let distance = estimate_distance(target_size, mils);
    if !distance.is_finite() {
        return Err(BallisticsError::InvalidInput(format!(
            "target size {target_size} at {mils} mils gives a non-finite distance"
        )));
    }
    Ok(distance)
}

/// Area of the projectile base for a given diameter.
pub fn bore_area(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

/// Acceleration of the projectile from chamber pressure acting on its base.
pub fn projectile_acceleration(pressure: f64, diameter: f64, mass: f64) -> f64 {
    pressure * bore_area(diameter) / mass
}

/// Exit speed under constant acceleration over the full barrel length
/// (`v² = 2·a·d`).
///
/// Real interior ballistics is not constant-acceleration, so this
/// overestimates for long barrels.
pub fn muzzle_velocity(acceleration: f64, barrel_length: f64) -> f64 {
    (2.0 * acceleration * barrel_length).sqrt()
}

/// Kinetic energy `m·v²/2`.
///
/// `mass` must be in the mass unit of the caller's system (slugs for
/// imperial, kilograms for SI) for the result to be in its energy unit.
pub fn projectile_energy(velocity: f64, mass: f64) -> f64 {
    mass * velocity.powi(2) / 2.0
}

/// Drag-free elevation angle that lands a shot on a level target at
/// `zero_distance`: `asin(g·d / v0²) / 2`.
///
/// Returns NaN when the target lies beyond the drag-free maximum range.
pub fn zero_angle(g: f64, zero_distance: f64, v0: f64) -> f64 {
    (g * zero_distance / v0.powi(2)).asin() / 2.0
}

/// Checked form of [`zero_angle`].
///
/// A zero distance of `0` means "no zero" and yields a flat launch.
pub fn solve_zero_angle(g: f64, zero_distance: f64, v0: f64) -> Result<f64> {
    if !(v0 > 0.0) || !v0.is_finite() {
        return Err(BallisticsError::InvalidInput(format!(
            "muzzle velocity must be positive and finite, got {v0}"
        )));
    }
    if zero_distance < 0.0 || !zero_distance.is_finite() {
        return Err(BallisticsError::InvalidInput(format!(
            "zero distance must be non-negative and finite, got {zero_distance}"
        )));
    }
    if zero_distance == 0.0 {
        return Ok(0.0);
    }

    let ratio = g * zero_distance / v0.powi(2);
    if ratio > 1.0 {
        return Err(BallisticsError::ZeroOutOfReach {
            zero_distance,
            max_range: v0.powi(2) / g,
        });
    }

    let theta = ratio.asin() / 2.0;
    debug!(zero_distance, v0, theta, "solved zero angle");
    Ok(theta)
}

/// Physical inputs for a muzzle velocity estimate, in one consistent unit
/// system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInputs {
    /// Chamber pressure (force per area)
    pub pressure: f64,
    /// Projectile diameter
    pub diameter: f64,
    /// Projectile mass
    pub mass: f64,
    /// Barrel length
    pub barrel_length: f64,
}

impl CalculatorInputs {
    /// Reject values that would send the formulas to infinity or NaN.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pressure", self.pressure),
            ("diameter", self.diameter),
            ("mass", self.mass),
            ("barrel length", self.barrel_length),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(BallisticsError::InvalidInput(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn acceleration(&self) -> f64 {
        projectile_acceleration(self.pressure, self.diameter, self.mass)
    }

    /// Validate, then chain acceleration into muzzle velocity.
    pub fn muzzle_velocity(&self) -> Result<f64> {
        self.validate()?;
        let acceleration = self.acceleration();
        let v0 = muzzle_velocity(acceleration, self.barrel_length);
        debug!(acceleration, v0, "estimated muzzle velocity");
        Ok(v0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_estimate_distance_mil_dot() {
        // 18 inch target subtending 10 mils
        assert_relative_eq!(estimate_distance(18.0, 10.0), 1800.0, max_relative = 1e-9);
    }

    #[test]
    fn test_estimate_distance_matches_formula() {
        for &(size, mils) in &[(1.8, 1.0), (0.5, 3.0), (72.0, 7.5), (2.0, 30.0)] {
            let expected = size * 1000.0 / mils;
            assert_relative_eq!(estimate_distance(size, mils), expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_estimate_distance_zero_mils_is_infinite() {
        assert!(estimate_distance(18.0, 0.0).is_infinite());
        assert!(checked_estimate_distance(18.0, 0.0).is_err());
    }

    #[test]
    fn test_checked_estimate_distance_ok() {
        let d = checked_estimate_distance(6.0, 2.0).unwrap();
        assert_relative_eq!(d, 3000.0);
    }

    #[test]
    fn test_projectile_acceleration() {
        // 1 unit of pressure on a base of diameter 2 -> area pi, mass 1
        assert_relative_eq!(projectile_acceleration(1.0, 2.0, 1.0), PI);
        assert_relative_eq!(projectile_acceleration(10.0, 2.0, 5.0), 2.0 * PI);
    }

    #[test]
    fn test_projectile_acceleration_zero_mass_is_infinite() {
        assert!(projectile_acceleration(55000.0, 0.223, 0.0).is_infinite());
    }

    #[test]
    fn test_muzzle_velocity_kinematics() {
        // v^2 = 2ad -> 2 * 50 * 4 = 400
        assert_relative_eq!(muzzle_velocity(50.0, 4.0), 20.0);
    }

    #[test]
    fn test_muzzle_velocity_monotonic() {
        let base = muzzle_velocity(1.0e6, 1.5);
        assert!(muzzle_velocity(2.0e6, 1.5) > base);
        assert!(muzzle_velocity(1.0e6, 2.0) > base);
        assert!(muzzle_velocity(0.5e6, 1.5) < base);
    }

    #[test]
    fn test_projectile_energy() {
        assert_relative_eq!(projectile_energy(10.0, 2.0), 100.0);
        assert!(projectile_energy(20.0, 2.0) > projectile_energy(10.0, 2.0));
        assert!(projectile_energy(10.0, 3.0) > projectile_energy(10.0, 2.0));
        // energy depends on v^2, so direction does not matter
        assert_relative_eq!(projectile_energy(-10.0, 2.0), projectile_energy(10.0, 2.0));
    }

    #[test]
    fn test_zero_angle_small_angle() {
        let g = 32.17405;
        let v0 = 3000.0;
        let theta = zero_angle(g, 300.0, v0);
        // small angle: theta ~ g d / (2 v0^2)
        assert_relative_eq!(theta, g * 300.0 / (2.0 * v0 * v0), max_relative = 1e-6);
    }

    #[test]
    fn test_zero_angle_at_max_range_is_45_degrees() {
        let theta = solve_zero_angle(10.0, 1000.0, 100.0).unwrap();
        assert_relative_eq!(theta, PI / 4.0, max_relative = 1e-9);
    }

    #[test]
    fn test_solve_zero_angle_out_of_reach() {
        let err = solve_zero_angle(9.80665, 5000.0, 100.0).unwrap_err();
        assert!(matches!(err, BallisticsError::ZeroOutOfReach { .. }));
        assert!(zero_angle(9.80665, 5000.0, 100.0).is_nan());
    }

    #[test]
    fn test_solve_zero_angle_no_zero() {
        assert_eq!(solve_zero_angle(9.80665, 0.0, 800.0).unwrap(), 0.0);
    }

    #[test]
    fn test_solve_zero_angle_rejects_zero_velocity() {
        assert!(solve_zero_angle(9.80665, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_calculator_inputs_validation() {
        let inputs = CalculatorInputs {
            pressure: 55000.0 * 144.0,
            diameter: 0.223 / 12.0,
            mass: 55.0 / 7000.0 / 32.17405,
            barrel_length: 1.5,
        };
        assert!(inputs.validate().is_ok());
        let v0 = inputs.muzzle_velocity().unwrap();
        assert!(v0.is_finite() && v0 > 0.0);

        let zero_mass = CalculatorInputs { mass: 0.0, ..inputs };
        assert!(matches!(
            zero_mass.muzzle_velocity(),
            Err(BallisticsError::InvalidInput(_))
        ));

        let nan_barrel = CalculatorInputs { barrel_length: f64::NAN, ..inputs };
        assert!(nan_barrel.validate().is_err());
    }
}
