//! Unit profiles.
//!
//! The engine works on plain magnitudes. A profile decides which base units
//! those magnitudes are in, how the human-facing inputs convert into them, and
//! how results convert back for display.
//!
//! | profile  | length | mass | force | inputs                                   | outputs                         |
//! |----------|--------|------|-------|------------------------------------------|---------------------------------|
//! | imperial | ft     | slug | lbf   | caliber in, weight gr, psi, barrel in, yd | drop in, ft/s, ft·lbf           |
//! | si       | m      | kg   | N     | caliber mm, weight g, MPa, barrel cm, m   | drop cm, m/s, J                 |

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::BallisticsError;

/// Unit system for input/output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Si,
}

impl UnitSystem {
    pub fn profile(self) -> &'static UnitProfile {
        match self {
            UnitSystem::Imperial => &IMPERIAL,
            UnitSystem::Si => &SI,
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = BallisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "si" => Ok(UnitSystem::Si),
            _ => Err(BallisticsError::UnsupportedUnit(s.to_string())),
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "imperial"),
            UnitSystem::Si => write!(f, "si"),
        }
    }
}

/// A short unit a length may be displayed in, largest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortUnit {
    pub symbol: &'static str,
    /// Size of the unit in the profile's table length unit
    pub scale: f64,
}

/// Conversion factors and labels for one unit system.
///
/// `*_to_base` factors multiply an input value to reach the profile's base
/// unit; `*_from_base` factors multiply a base value to reach the display unit.
#[derive(Debug, PartialEq)]
pub struct UnitProfile {
    pub system: UnitSystem,

    /// Gravitational acceleration in base units
    pub gravity: f64,
    /// Sea-level air density in base units
    pub air_density: f64,
    /// Speed of sound in base units
    pub speed_of_sound: f64,

    pub caliber_to_base: f64,
    pub weight_to_base: f64,
    pub pressure_to_base: f64,
    pub barrel_to_base: f64,
    /// Table distance unit (yards or meters) to base length
    pub distance_to_base: f64,

    pub drop_from_base: f64,
    pub velocity_from_base: f64,
    pub energy_from_base: f64,

    pub caliber_label: &'static str,
    pub weight_label: &'static str,
    pub pressure_label: &'static str,
    pub barrel_label: &'static str,

    pub trajectory_headers: [&'static str; 5],
    /// Size of the range-table length unit (ft or m) in meters
    pub length_unit_meters: f64,
    /// Units range-table distances are formatted in, relative to the
    /// length unit the target sizes are given in
    pub range_units: &'static [ShortUnit],

    /// Default caliber in input units
    pub default_caliber: f64,
    pub default_weight: f64,
    pub default_pressure: f64,
    pub default_barrel_length: f64,
}

pub static IMPERIAL: UnitProfile = UnitProfile {
    system: UnitSystem::Imperial,

    gravity: G_ACCEL_FPS2,
    air_density: AIR_DENSITY_SEA_LEVEL_IMPERIAL,
    speed_of_sound: SPEED_OF_SOUND_FPS,

    caliber_to_base: 1.0 / INCHES_PER_FOOT,
    weight_to_base: 1.0 / (GRAINS_PER_POUND * G_ACCEL_FPS2),
    pressure_to_base: SQ_INCHES_PER_SQ_FOOT,
    barrel_to_base: 1.0 / INCHES_PER_FOOT,
    distance_to_base: FEET_PER_YARD,

    drop_from_base: INCHES_PER_FOOT,
    velocity_from_base: 1.0,
    energy_from_base: 1.0,

    caliber_label: "in",
    weight_label: "gr",
    pressure_label: "psi",
    barrel_label: "in",

    trajectory_headers: ["yards", "time", "drop (in)", "velocity (ft/s)", "energy (ft-lbs)"],
    length_unit_meters: METERS_PER_FOOT,
    // target sizes in feet
    range_units: &[
        ShortUnit { symbol: "yd", scale: FEET_PER_YARD },
        ShortUnit { symbol: "ft", scale: 1.0 },
    ],

    default_caliber: 0.223,
    default_weight: 55.0,
    default_pressure: 55_000.0,
    default_barrel_length: 18.0,
};

pub static SI: UnitProfile = UnitProfile {
    system: UnitSystem::Si,

    gravity: G_ACCEL_MPS2,
    air_density: AIR_DENSITY_SEA_LEVEL_SI,
    speed_of_sound: SPEED_OF_SOUND_MPS,

    caliber_to_base: 1.0 / MM_PER_METER,
    weight_to_base: 1.0 / GRAMS_PER_KG,
    pressure_to_base: PA_PER_MPA,
    barrel_to_base: 1.0 / CM_PER_METER,
    distance_to_base: 1.0,

    drop_from_base: CM_PER_METER,
    velocity_from_base: 1.0,
    energy_from_base: 1.0,

    caliber_label: "mm",
    weight_label: "g",
    pressure_label: "MPa",
    barrel_label: "cm",

    trajectory_headers: ["meters", "time", "drop (cm)", "velocity (m/s)", "energy (J)"],
    length_unit_meters: 1.0,
    // target sizes in meters
    range_units: &[
        ShortUnit { symbol: "km", scale: METERS_PER_KM },
        ShortUnit { symbol: "m", scale: 1.0 },
    ],

    default_caliber: 5.664,
    default_weight: 55.0 * GRAINS_TO_KG * GRAMS_PER_KG,
    default_pressure: 379.2,
    default_barrel_length: 45.72,
};

/// Length suffixes accepted for target sizes, with their size in meters.
const LENGTH_SUFFIXES: &[(&str, f64)] = &[
    ("in", METERS_PER_FOOT / INCHES_PER_FOOT),
    ("ft", METERS_PER_FOOT),
    ("yd", METERS_PER_FOOT * FEET_PER_YARD),
    ("mm", 1.0 / MM_PER_METER),
    ("cm", 1.0 / CM_PER_METER),
    ("km", METERS_PER_KM),
    ("m", 1.0),
];

impl UnitProfile {
    /// Parse a target size such as `"18in"`, `"6ft"` or `"1.8m"` into the
    /// profile's range-table length unit. A bare number is taken as already
    /// being in that unit.
    pub fn parse_length(&self, input: &str) -> Result<f64, BallisticsError> {
        let trimmed = input.trim();
        let (number, meters_per_unit) = LENGTH_SUFFIXES
            .iter()
            .find_map(|(suffix, meters)| {
                trimmed
                    .strip_suffix(suffix)
                    .map(|number| (number.trim_end(), *meters))
            })
            .unwrap_or((trimmed, self.length_unit_meters));

        let value: f64 = number
            .parse()
            .map_err(|_| BallisticsError::InvalidInput(format!("invalid length: {input}")))?;
        if !value.is_finite() {
            return Err(BallisticsError::InvalidInput(format!("invalid length: {input}")));
        }
        Ok(value * meters_per_unit / self.length_unit_meters)
    }

    /// Format a length (in the unit the target sizes were given in) using the
    /// largest short unit it fills at least once, e.g. `"600yd"` or `"1.5km"`.
    pub fn format_length(&self, value: f64) -> String {
        let unit = self
            .range_units
            .iter()
            .find(|u| value.abs() >= u.scale)
            .or_else(|| self.range_units.last());

        match unit {
            Some(unit) => format!("{}{}", trim_number(value / unit.scale), unit.symbol),
            None => trim_number(value),
        }
    }
}

/// Two decimals with trailing zeros dropped.
fn trim_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // values that round to zero print without a sign
    let value = if (value * 100.0).round() == 0.0 { 0.0 } else { value };
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
