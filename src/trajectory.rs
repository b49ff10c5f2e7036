//! Point-mass trajectory stepper.
//!
//! The stepper advances a projectile along the horizontal axis one query at a
//! time. Each call to [`TrajectoryStepper::step`] covers the interval from the
//! previous query to the new distance with a single explicit Euler step, so
//! accuracy depends entirely on how finely the caller spaces its queries.
//!
//! Two simplifications are deliberate parts of the model:
//!
//! * drag is a scalar deceleration subtracted from both velocity components,
//!   not a vector resolved along the flight path;
//! * drag is evaluated at the speed reached at the end of the previous step.
//!
//! Distances must be queried in non-decreasing order. A backward query is
//! rejected and leaves the state untouched.

use tracing::debug;

use crate::drag_model::DragFunction;
use crate::error::{BallisticsError, Result};

/// Static inputs of a trajectory, fixed for the lifetime of a stepper.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryParameters<D> {
    /// Gravitational acceleration
    pub g: f64,
    /// Muzzle velocity
    pub v0: f64,
    /// Launch angle above the bore line (radians)
    pub theta: f64,
    /// Drag law
    pub drag: D,
}

/// State of the projectile at a queried distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Horizontal distance from the muzzle
    pub distance: f64,
    /// Elapsed time of flight
    pub time: f64,
    /// Vertical displacement from the bore line; negative below it
    pub drop: f64,
    /// Speed magnitude
    pub velocity: f64,
}

/// Stateful Euler integrator queried at increasing horizontal distances.
///
/// A stepper belongs to one table computation; build a fresh one for every
/// trajectory.
#[derive(Debug, Clone)]
pub struct TrajectoryStepper<D> {
    g: f64,
    drag: D,
    last_x: f64,
    ux: f64,
    uy: f64,
    y: f64,
    t: f64,
    v: f64,
}

impl<D: DragFunction> TrajectoryStepper<D> {
    pub fn new(params: TrajectoryParameters<D>) -> Self {
        let TrajectoryParameters { g, v0, theta, drag } = params;
        let (sin_theta, cos_theta) = theta.sin_cos();
        debug!(g, v0, theta, "starting trajectory");

        Self {
            g,
            drag,
            last_x: 0.0,
            ux: v0 * cos_theta,
            uy: v0 * sin_theta,
            y: 0.0,
            t: 0.0,
            v: v0,
        }
    }

    /// Advance the projectile to horizontal distance `x`.
    ///
    /// # Errors
    ///
    /// * [`BallisticsError::InvalidInput`] if `x` is not finite.
    /// * [`BallisticsError::NonMonotonicDistance`] if `x` is behind the
    ///   previous query.
    /// * [`BallisticsError::Stalled`] if the horizontal velocity has dropped
    ///   to zero or below, so the projectile can never reach `x`.
    ///
    /// The state is unchanged whenever an error is returned.
    pub fn step(&mut self, x: f64) -> Result<TrajectoryPoint> {
        if !x.is_finite() {
            return Err(BallisticsError::InvalidInput(format!(
                "trajectory distance must be finite, got {x}"
            )));
        }
        if x < self.last_x {
            return Err(BallisticsError::NonMonotonicDistance {
                previous: self.last_x,
                requested: x,
            });
        }

        let moving = self.ux > 0.0 && self.ux.is_finite();
        if !moving {
            if x == self.last_x {
                return Ok(self.point());
            }
            return Err(BallisticsError::Stalled {
                distance: x,
                horizontal_velocity: self.ux,
            });
        }

        let delta_t = (x - self.last_x) / self.ux;
        self.last_x = x;

        let drag = self.drag.deceleration(self.v);

        self.y += self.uy * delta_t;

        self.ux -= drag * delta_t;
        self.uy -= (drag + self.g) * delta_t;

        self.v = (self.ux.powi(2) + self.uy.powi(2)).sqrt();

        self.t += delta_t;

        Ok(self.point())
    }

    /// Current state as a point, without advancing.
    pub fn point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            distance: self.last_x,
            time: self.t,
            drop: self.y,
            velocity: self.v,
        }
    }

    pub fn last_x(&self) -> f64 {
        self.last_x
    }

    /// Horizontal velocity component
    pub fn ux(&self) -> f64 {
        self.ux
    }

    /// Vertical velocity component
    pub fn uy(&self) -> f64 {
        self.uy
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn velocity(&self) -> f64 {
        self.v
    }
}
