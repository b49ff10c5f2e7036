/// Physical constants and unit conversion factors used by the calculator,
/// the unit profiles, and the drag models.

/// Standard gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Standard gravitational acceleration in ft/s²
pub const G_ACCEL_FPS2: f64 = 32.17405;

/// Standard air density at sea level (kg/m³)
pub const AIR_DENSITY_SEA_LEVEL_SI: f64 = 1.225;

/// Standard air density at sea level (slug/ft³)
///
/// Equivalent to 0.0765 lb/ft³ divided by standard gravity.
pub const AIR_DENSITY_SEA_LEVEL_IMPERIAL: f64 = 0.0023769;

/// Speed of sound at sea level, standard atmospheric conditions
///
/// Value: 340.29 m/s (1116.45 ft/s)
/// Conditions: 15°C (59°F), 1013.25 hPa, dry air
///
/// Source: International Standard Atmosphere (ISO 2533)
pub const SPEED_OF_SOUND_MPS: f64 = 340.29;

/// Speed of sound at sea level in ft/s
pub const SPEED_OF_SOUND_FPS: f64 = 1116.45;

/// Mils subtended by a target at the distance equal to 1000 target sizes
pub const MILS_PER_UNIT_SUBTENSION: f64 = 1000.0;

// Length conversions
pub const INCHES_PER_FOOT: f64 = 12.0;
pub const METERS_PER_FOOT: f64 = 0.3048;
pub const FEET_PER_YARD: f64 = 3.0;
pub const MM_PER_METER: f64 = 1000.0;
pub const CM_PER_METER: f64 = 100.0;
pub const METERS_PER_KM: f64 = 1000.0;

// Mass conversions
pub const GRAINS_PER_POUND: f64 = 7000.0;
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Conversion factor: grains to kilograms
pub const GRAINS_TO_KG: f64 = 0.00006479891;

// Pressure conversions
pub const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;
pub const PA_PER_MPA: f64 = 1.0e6;

/// Minimum threshold for preventing division by zero in interpolation
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;
