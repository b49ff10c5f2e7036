use thiserror::Error;

/// Errors raised at the boundaries of the engine.
///
/// The closed-form calculator functions never return these; they follow
/// IEEE-754 rules and let infinities and NaNs propagate. The checked
/// companions, the stepper, and the configuration layer use this type.
#[derive(Debug, Error)]
pub enum BallisticsError {
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("unknown drag model: {0}")]
    UnknownDragModel(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("distance {requested} is behind the previous query at {previous}")]
    NonMonotonicDistance { previous: f64, requested: f64 },

    #[error("projectile stalled before {distance} (horizontal velocity {horizontal_velocity})")]
    Stalled {
        distance: f64,
        horizontal_velocity: f64,
    },

    #[error("zero distance {zero_distance} exceeds the drag-free maximum range {max_range}")]
    ZeroOutOfReach { zero_distance: f64, max_range: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BallisticsError>;
