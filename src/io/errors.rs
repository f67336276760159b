//! Errors for decoding constrained parameters from flat buffers (stream
//! exhaustion, shape requests, validation failures, sparse coordinates).
//!
//! This module defines the reader error type, [`DecodeError`], used by every
//! operation in `io`. It implements `Display`/`Error` and absorbs
//! [`TransformError`] from the transform library.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to the flat column-major position
//!   within the value being decoded.
//! - All errors are terminal for the current request and are returned
//!   unmodified; the reader never retries or rolls back the cursor.
use crate::transforms::errors::TransformError;

/// Result alias for reader operations that may produce [`DecodeError`].
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Which flat buffer a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Reals,
    Integers,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Reals => write!(f, "real"),
            Stream::Integers => write!(f, "integer"),
        }
    }
}

/// A number from either stream, carried in error payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Real(f64),
    Integer(i64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Real(v) => write!(f, "{v}"),
            Number::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// Unified error type for the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    // ---- Cursor ----
    /// A read requested more values than remain in its stream.
    OutOfData { stream: Stream, requested: usize, available: usize },

    /// A full decode finished with unread values left over.
    TrailingData { reals: usize, ints: usize },

    // ---- Shape requests ----
    /// The kind/shape combination is meaningless or has an invalid size.
    InvalidShape { kind: &'static str, size: String, reason: &'static str },

    /// Sparse coordinate lists have different lengths.
    CoordinateLengthMismatch { rows: usize, cols: usize },

    /// A sparse coordinate lies outside `nrows × ncols` or is negative.
    InvalidCoordinates { index: usize, row: i64, col: i64, nrows: usize, ncols: usize },

    // ---- Validation ----
    /// A value read in validate mode fails its constraint.
    ConstraintViolation { kind: &'static str, value: Number, index: usize, reason: String },

    /// Bounded read with `lb > ub`.
    InconsistentBounds { lb: Number, ub: Number },

    // ---- Configuration ----
    /// Reader options failed validation.
    InvalidOptions { value: String, reason: &'static str },

    // ---- Transform library ----
    /// A transform rejected its parameters or input.
    Transform(TransformError),
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Transform(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Cursor ----
            DecodeError::OutOfData { stream, requested, available } => {
                write!(
                    f,
                    "Out of {stream} data: requested {requested} value(s), {available} available"
                )
            }
            DecodeError::TrailingData { reals, ints } => {
                write!(f, "Decode finished with {reals} real and {ints} integer value(s) unread")
            }

            // ---- Shape requests ----
            DecodeError::InvalidShape { kind, size, reason } => {
                write!(f, "Invalid shape {size} for {kind}: {reason}")
            }
            DecodeError::CoordinateLengthMismatch { rows, cols } => {
                write!(
                    f,
                    "Sparse coordinate lists differ in length: {rows} row(s) vs {cols} column(s)"
                )
            }
            DecodeError::InvalidCoordinates { index, row, col, nrows, ncols } => {
                write!(
                    f,
                    "Sparse coordinate {index} at ({row}, {col}) is outside a {nrows}x{ncols} matrix"
                )
            }

            // ---- Validation ----
            DecodeError::ConstraintViolation { kind, value, index, reason } => {
                write!(f, "{kind} constraint violated at index {index} (value {value}): {reason}")
            }
            DecodeError::InconsistentBounds { lb, ub } => {
                write!(f, "Inconsistent bounds: lower bound {lb} exceeds upper bound {ub}")
            }

            // ---- Configuration ----
            DecodeError::InvalidOptions { value, reason } => {
                write!(f, "Invalid reader option {value}: {reason}")
            }

            // ---- Transform library ----
            DecodeError::Transform(err) => write!(f, "Transform failed: {err}"),
        }
    }
}

impl From<TransformError> for DecodeError {
    fn from(err: TransformError) -> DecodeError {
        DecodeError::Transform(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that transform errors convert and keep their source.
    //
    // Given
    // -----
    // - A `TransformError::ZeroNorm`.
    //
    // Expect
    // ------
    // - Conversion yields `DecodeError::Transform` with the error as source
    //   and its message embedded in `Display`.
    fn transform_errors_convert_and_chain() {
        use std::error::Error;

        let err: DecodeError = TransformError::ZeroNorm { squared_norm: 0.0 }.into();
        assert!(matches!(err, DecodeError::Transform(TransformError::ZeroNorm { .. })));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("squared norm"));
    }

    #[test]
    // Purpose
    // -------
    // Spot-check messages carry their payloads.
    //
    // Given
    // -----
    // - `OutOfData` on the integer stream and `InconsistentBounds`.
    //
    // Expect
    // ------
    // - Stream name and counts, and both bounds, appear in the message.
    fn display_includes_payload() {
        let msg = DecodeError::OutOfData { stream: Stream::Integers, requested: 3, available: 1 }
            .to_string();
        assert!(msg.contains("integer") && msg.contains('3') && msg.contains('1'));

        let msg =
            DecodeError::InconsistentBounds { lb: Number::Integer(5), ub: Number::Integer(3) }
                .to_string();
        assert!(msg.contains('5') && msg.contains('3'));
    }
}
