//! Errors raised by the transform library.
//!
//! The bijections themselves are total on ℝⁿ; what can fail is the
//! *parameterization* of a transform (an empty interval, a non-positive
//! multiplier) or a degenerate input the map is undefined on (a zero vector
//! for the unit-vector transform). These are reported as [`TransformError`]
//! and converted to `DecodeError` at the reader boundary.

/// Result alias for transform-library operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Domain errors of the standard transform library.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Bounded transform requires `lb < ub`.
    DegenerateInterval { lb: f64, ub: f64 },

    /// Offset/multiplier transform requires a finite multiplier > 0.
    InvalidMultiplier { value: f64 },

    /// Offset/multiplier transform requires a finite offset.
    InvalidOffset { value: f64 },

    /// Unit-vector transform is undefined for a zero (or non-finite) norm.
    ZeroNorm { squared_norm: f64 },

    /// A transform received a raw run of the wrong length for its shape.
    LengthMismatch { expected: usize, actual: usize },
}

impl std::error::Error for TransformError {}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::DegenerateInterval { lb, ub } => {
                write!(f, "Bounded transform requires lb < ub; got lb = {lb}, ub = {ub}")
            }
            TransformError::InvalidMultiplier { value } => {
                write!(f, "Multiplier must be finite and > 0; got {value}")
            }
            TransformError::InvalidOffset { value } => {
                write!(f, "Offset must be finite; got {value}")
            }
            TransformError::ZeroNorm { squared_norm } => {
                write!(
                    f,
                    "Unit vector transform requires a positive, finite squared norm; got {squared_norm}"
                )
            }
            TransformError::LengthMismatch { expected, actual } => {
                write!(f, "Transform input length mismatch: expected {expected}, got {actual}")
            }
        }
    }
}
