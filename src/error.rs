use thiserror::Error;

/// Top-level error type for the gyre envelope engine.
///
/// Only invalid inputs are errors. No-solution outcomes (a disk sequence
/// the contact graph cannot realize, a hull walk that cannot proceed) are
/// ordinary return values: an empty path or a degenerate hull result
/// carrying a reason code.
#[derive(Debug, Error)]
pub enum GyreError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to engine operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`GyreError`].
pub type Result<T> = std::result::Result<T, GyreError>;
