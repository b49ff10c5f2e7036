//! Mach-indexed drag coefficient tables and the drag laws built on them.

use once_cell::sync::Lazy;

use crate::calculator::bore_area;
use crate::constants::MIN_DIVISION_THRESHOLD;
use crate::drag_model::{DragFunction, DragModel, NoDrag, QuadraticDrag};

/// Drag coefficient as a piecewise-linear function of Mach number.
#[derive(Debug, Clone)]
pub struct DragTable {
    pub mach_values: Vec<f64>,
    pub cd_values: Vec<f64>,
}

impl DragTable {
    /// Both vectors must be sorted by Mach and of equal length.
    pub fn new(mach_values: Vec<f64>, cd_values: Vec<f64>) -> Self {
        Self { mach_values, cd_values }
    }

    fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mach_values = pairs.iter().map(|(m, _)| *m).collect();
        let cd_values = pairs.iter().map(|(_, cd)| *cd).collect();
        Self::new(mach_values, cd_values)
    }

    /// Linearly interpolate the drag coefficient at `mach`.
    ///
    /// Values outside the table are clamped to the nearest end point.
    pub fn interpolate(&self, mach: f64) -> f64 {
        let n = self.mach_values.len().min(self.cd_values.len());
        if n == 0 {
            return 0.0;
        }
        if n == 1 || mach <= self.mach_values[0] {
            return self.cd_values[0];
        }
        if mach >= self.mach_values[n - 1] {
            return self.cd_values[n - 1];
        }

        // first index whose mach exceeds the query; always in 1..n here
        let upper = self.mach_values[..n].partition_point(|&m| m <= mach);
        let idx = upper - 1;
        self.linear_interpolate(mach, idx)
    }

    fn linear_interpolate(&self, mach: f64, idx: usize) -> f64 {
        let x0 = self.mach_values[idx];
        let x1 = self.mach_values[idx + 1];
        let y0 = self.cd_values[idx];
        let y1 = self.cd_values[idx + 1];

        if (x1 - x0).abs() < MIN_DIVISION_THRESHOLD {
            return y0;
        }

        let t = (mach - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }
}

/// Flat-base reference projectile.
static G1_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| {
    DragTable::from_pairs(&[
        (0.0, 0.2629),
        (0.5, 0.2695),
        (0.6, 0.2752),
        (0.7, 0.2817),
        (0.8, 0.2902),
        (0.9, 0.3012),
        (1.0, 0.4805),
        (1.1, 0.5933),
        (1.2, 0.6318),
        (1.3, 0.6440),
        (1.4, 0.6444),
        (1.5, 0.6372),
        (1.6, 0.6252),
        (1.7, 0.6105),
        (1.8, 0.5956),
        (1.9, 0.5815),
        (2.0, 0.5934),
        (2.5, 0.5598),
        (3.0, 0.5133),
        (4.0, 0.4811),
        (5.0, 0.4988),
    ])
});

/// Boat-tail reference projectile.
static G7_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| {
    DragTable::from_pairs(&[
        (0.0, 0.1198),
        (0.5, 0.1197),
        (0.6, 0.1202),
        (0.7, 0.1213),
        (0.8, 0.1240),
        (0.9, 0.1294),
        (1.0, 0.3803),
        (1.1, 0.4015),
        (1.2, 0.4043),
        (1.3, 0.3956),
        (1.4, 0.3814),
        (1.5, 0.3663),
        (1.6, 0.3520),
        (1.7, 0.3398),
        (1.8, 0.3297),
        (1.9, 0.3221),
        (2.0, 0.2980),
        (2.5, 0.2731),
        (3.0, 0.2424),
        (4.0, 0.2196),
        (5.0, 0.1618),
    ])
});

/// Reference curve for a tabulated drag model, if it has one.
pub fn reference_table(model: DragModel) -> Option<&'static DragTable> {
    match model {
        DragModel::G1 => Some(&*G1_DRAG_TABLE),
        DragModel::G7 => Some(&*G7_DRAG_TABLE),
        DragModel::None | DragModel::Quadratic => None,
    }
}

/// Reference drag coefficient at `mach`; `None` for untabulated models.
pub fn get_drag_coefficient(mach: f64, drag_model: DragModel) -> Option<f64> {
    reference_table(drag_model).map(|table| table.interpolate(mach))
}

/// Quadratic drag whose coefficient follows a Mach-indexed reference curve.
#[derive(Debug, Clone, Copy)]
pub struct TabulatedDrag {
    pub table: &'static DragTable,
    pub speed_of_sound: f64,
    pub air_density: f64,
    pub reference_area: f64,
    pub mass: f64,
}

impl TabulatedDrag {
    pub fn for_projectile(
        table: &'static DragTable,
        speed_of_sound: f64,
        air_density: f64,
        diameter: f64,
        mass: f64,
    ) -> Self {
        Self {
            table,
            speed_of_sound,
            air_density,
            reference_area: bore_area(diameter),
            mass,
        }
    }
}

impl DragFunction for TabulatedDrag {
    fn deceleration(&self, velocity: f64) -> f64 {
        let cd = self.table.interpolate(velocity.abs() / self.speed_of_sound);
        0.5 * self.air_density * cd * self.reference_area * velocity.powi(2) / self.mass
    }
}

/// Closed set of drag laws the configuration layer can build.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredDrag {
    None(NoDrag),
    Quadratic(QuadraticDrag),
    Tabulated(TabulatedDrag),
}

impl DragFunction for ConfiguredDrag {
    fn deceleration(&self, velocity: f64) -> f64 {
        match self {
            ConfiguredDrag::None(d) => d.deceleration(velocity),
            ConfiguredDrag::Quadratic(d) => d.deceleration(velocity),
            ConfiguredDrag::Tabulated(d) => d.deceleration(velocity),
        }
    }
}
