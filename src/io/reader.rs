//! The decode session: a cursor pair, a transform library, and a logger.
//!
//! Purpose
//! -------
//! Decode a flat real buffer and a flat integer buffer into the typed,
//! constrained values a model declares, one request at a time, in
//! declaration order.
//!
//! Key behaviors
//! -------------
//! - [`Reader::decode`] is the single entry point for real-valued requests:
//!   it checks the kind/shape combination, computes the raw count for the
//!   mode, performs one bounds-checked bulk read, and dispatches.
//! - Integer requests (`integer`, `integer_lb`, `integer_ub`, `integer_lub`)
//!   read the integer stream and are never transformed; every mode
//!   validates them.
//! - Typed helpers (`decode_scalar`, `decode_vector`, …) unwrap the
//!   [`Value`] for callers that know the shape statically.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each call advances each cursor at most once and never rolls back.
//!   Failures raised before the read (shape checks) consume nothing;
//!   failures after the read (bounds, predicates, transforms) keep the
//!   consumption.
//! - For bounded requests the order is fixed: read, check `lb ≤ ub`, check
//!   `x ≥ lb`, check `x ≤ ub`.
//!
//! Conventions
//! -----------
//! - Failed requests are logged at `debug` with the kind, shape, and cursor
//!   positions. The default logger discards everything.
use crate::{
    io::{
        assemble,
        cursor::Cursor,
        dispatch,
        errors::{DecodeError, DecodeResult, Number},
        kind::ConstraintKind,
        mode::Mode,
        options::ReaderOptions,
        shape::{Shape, SparseCoords},
        value::Value,
    },
    transforms::{StandardTransforms, Transforms},
};
use nalgebra_sparse::CscMatrix;
use ndarray::{Array1, Array2};
use slog::{Discard, Logger, debug, o};

/// Decoder over borrowed real and integer buffers.
#[derive(Debug)]
pub struct Reader<'a, X: Transforms = StandardTransforms> {
    cursor: Cursor<'a>,
    transforms: X,
    options: ReaderOptions,
    logger: Logger,
}

impl<'a> Reader<'a, StandardTransforms> {
    /// Reader with the standard transform library and default options.
    pub fn new(reals: &'a [f64], ints: &'a [i64]) -> Self {
        Reader::with_options(reals, ints, ReaderOptions::default())
    }

    /// Reader with the standard transform library using `options.tolerance`.
    pub fn with_options(reals: &'a [f64], ints: &'a [i64], options: ReaderOptions) -> Self {
        Reader {
            cursor: Cursor::new(reals, ints),
            transforms: StandardTransforms::new(options.tolerance),
            options,
            logger: Logger::root(Discard, o!()),
        }
    }
}

impl<'a, X: Transforms> Reader<'a, X> {
    /// Reader over a caller-supplied transform library.
    ///
    /// `options.tolerance` is not forwarded; `transforms.tolerance()` governs
    /// the predicates.
    pub fn with_transforms(
        reals: &'a [f64], ints: &'a [i64], transforms: X, options: ReaderOptions,
    ) -> Self {
        Reader {
            cursor: Cursor::new(reals, ints),
            transforms,
            options,
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn transforms(&self) -> &X {
        &self.transforms
    }

    // ---- Cursor passthroughs ----

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn position_i(&self) -> usize {
        self.cursor.position_i()
    }

    pub fn available(&self) -> usize {
        self.cursor.available()
    }

    pub fn available_i(&self) -> usize {
        self.cursor.available_i()
    }

    /// Fails with [`DecodeError::TrailingData`] unless both buffers are
    /// fully consumed.
    pub fn finish(&self) -> DecodeResult<()> {
        self.cursor.finish()
    }

    // ---- Raw reads ----

    pub fn next_scalar(&mut self) -> DecodeResult<f64> {
        self.cursor.next_scalar()
    }

    pub fn next_scalars(&mut self, n: usize) -> DecodeResult<&'a [f64]> {
        self.cursor.next_scalars(n)
    }

    pub fn next_integer(&mut self) -> DecodeResult<i64> {
        self.cursor.next_integer()
    }

    pub fn next_integers(&mut self, n: usize) -> DecodeResult<&'a [i64]> {
        self.cursor.next_integers(n)
    }

    pub fn vector(&mut self, m: usize) -> DecodeResult<Array1<f64>> {
        assemble::vector(&mut self.cursor, m)
    }

    pub fn std_vector(&mut self, m: usize) -> DecodeResult<Vec<f64>> {
        assemble::std_vector(&mut self.cursor, m)
    }

    pub fn row_vector(&mut self, m: usize) -> DecodeResult<Array2<f64>> {
        assemble::row_vector(&mut self.cursor, m)
    }

    pub fn matrix(&mut self, n: usize, m: usize) -> DecodeResult<Array2<f64>> {
        assemble::matrix(&mut self.cursor, n, m)
    }

    pub fn sparse_matrix(&mut self, coords: &SparseCoords) -> DecodeResult<CscMatrix<f64>> {
        assemble::sparse_matrix(&mut self.cursor, coords, self.options.triplet_layout)
    }

    // ---- Integer reads ----

    pub fn integer(&mut self) -> DecodeResult<i64> {
        self.read_integer("integer", i64::MIN, i64::MAX)
    }

    /// Integer `≥ lb`.
    pub fn integer_lb(&mut self, lb: i64) -> DecodeResult<i64> {
        self.read_integer("integer_lb", lb, i64::MAX)
    }

    /// Integer `≤ ub`.
    pub fn integer_ub(&mut self, ub: i64) -> DecodeResult<i64> {
        self.read_integer("integer_ub", i64::MIN, ub)
    }

    /// Integer in `[lb, ub]`.
    ///
    /// # Errors
    /// - [`DecodeError::OutOfData`] if the integer stream is exhausted.
    /// - [`DecodeError::InconsistentBounds`] if `lb > ub` (the integer is
    ///   still consumed).
    /// - [`DecodeError::ConstraintViolation`] if the value is out of range.
    pub fn integer_lub(&mut self, lb: i64, ub: i64) -> DecodeResult<i64> {
        self.read_integer("integer_lub", lb, ub)
    }

    /// Every integer read, logged on failure like [`Reader::decode`].
    fn read_integer(&mut self, name: &str, lb: i64, ub: i64) -> DecodeResult<i64> {
        let read = self.cursor.next_integer().and_then(|n| {
            if lb > ub {
                return Err(DecodeError::InconsistentBounds {
                    lb: Number::Integer(lb),
                    ub: Number::Integer(ub),
                });
            }
            check_integer_lb(n, lb).and_then(|n| check_integer_ub(n, ub))
        });
        read.inspect_err(|err| self.log_failure(name, "int", err))
    }

    // ---- Constrained reads ----

    /// Decode one value of `shape` under constraint `kind`.
    ///
    /// Raw count: [`ConstraintKind::constrained_len`] in validate mode,
    /// [`ConstraintKind::unconstrained_len`] otherwise.
    ///
    /// # Errors
    /// - [`DecodeError::InvalidShape`] before any read.
    /// - [`DecodeError::OutOfData`] if the run does not fit; nothing is read.
    /// - [`DecodeError::InconsistentBounds`] for `Bounded { lb, ub }` with
    ///   `lb > ub`, after the read.
    /// - [`DecodeError::ConstraintViolation`] in validate mode.
    /// - [`DecodeError::Transform`] when the transform library rejects its
    ///   parameters or input.
    pub fn decode(
        &mut self, kind: &ConstraintKind, shape: &Shape, mode: Mode<'_>,
    ) -> DecodeResult<Value> {
        self.decode_inner(kind, shape, mode).inspect_err(|err| {
            self.log_failure(kind.name(), &shape.to_string(), err);
        })
    }

    fn decode_inner(
        &mut self, kind: &ConstraintKind, shape: &Shape, mut mode: Mode<'_>,
    ) -> DecodeResult<Value> {
        let len = if mode.is_validate() {
            kind.constrained_len(shape)?
        } else {
            kind.unconstrained_len(shape)?
        };
        let raw = self.cursor.next_scalars(len)?;
        if let ConstraintKind::Bounded { lb, ub } = *kind {
            if lb > ub {
                return Err(DecodeError::InconsistentBounds {
                    lb: Number::Real(lb),
                    ub: Number::Real(ub),
                });
            }
        }
        let layout = self.options.triplet_layout;
        if mode.is_validate() {
            dispatch::validate(&self.transforms, kind, shape, raw, layout)
        } else {
            dispatch::constrain(&self.transforms, kind, shape, raw, mode.jacobian(), layout)
        }
    }

    pub fn decode_scalar(&mut self, kind: &ConstraintKind, mode: Mode<'_>) -> DecodeResult<f64> {
        match self.decode(kind, &Shape::Scalar, mode)? {
            Value::Scalar(x) => Ok(x),
            other => Err(unexpected(kind, &other)),
        }
    }

    pub fn decode_vector(
        &mut self, kind: &ConstraintKind, k: usize, mode: Mode<'_>,
    ) -> DecodeResult<Array1<f64>> {
        match self.decode(kind, &Shape::Vector(k), mode)? {
            Value::Vector(v) => Ok(v),
            other => Err(unexpected(kind, &other)),
        }
    }

    pub fn decode_row_vector(
        &mut self, kind: &ConstraintKind, k: usize, mode: Mode<'_>,
    ) -> DecodeResult<Array2<f64>> {
        match self.decode(kind, &Shape::RowVector(k), mode)? {
            Value::RowVector(v) => Ok(v),
            other => Err(unexpected(kind, &other)),
        }
    }

    pub fn decode_matrix(
        &mut self, kind: &ConstraintKind, n: usize, m: usize, mode: Mode<'_>,
    ) -> DecodeResult<Array2<f64>> {
        match self.decode(kind, &Shape::Matrix(n, m), mode)? {
            Value::Matrix(x) => Ok(x),
            other => Err(unexpected(kind, &other)),
        }
    }

    pub fn decode_sparse(
        &mut self, kind: &ConstraintKind, coords: &SparseCoords, mode: Mode<'_>,
    ) -> DecodeResult<CscMatrix<f64>> {
        match self.decode(kind, &Shape::Sparse(coords.clone()), mode)? {
            Value::Sparse(x) => Ok(x),
            other => Err(unexpected(kind, &other)),
        }
    }

    fn log_failure(&self, kind: &str, shape: &str, err: &DecodeError) {
        debug!(self.logger, "decode failed";
            "kind" => kind,
            "shape" => shape,
            "real_pos" => self.cursor.position(),
            "int_pos" => self.cursor.position_i(),
            "error" => %err);
    }
}

fn check_integer_lb(n: i64, lb: i64) -> DecodeResult<i64> {
    if n < lb {
        return Err(DecodeError::ConstraintViolation {
            kind: "integer",
            value: Number::Integer(n),
            index: 0,
            reason: format!("must be greater than or equal to {lb}"),
        });
    }
    Ok(n)
}

fn check_integer_ub(n: i64, ub: i64) -> DecodeResult<i64> {
    if n > ub {
        return Err(DecodeError::ConstraintViolation {
            kind: "integer",
            value: Number::Integer(n),
            index: 0,
            reason: format!("must be less than or equal to {ub}"),
        });
    }
    Ok(n)
}

fn unexpected(kind: &ConstraintKind, value: &Value) -> DecodeError {
    DecodeError::InvalidShape {
        kind: kind.name(),
        size: format!("{} value(s)", value.len()),
        reason: "transform returned an unexpected container",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Consumption per mode (constrained vs unconstrained counts).
    // - Failures before vs after the read, and cursor positions afterwards.
    // - Integer reads and their check order.
    // - Jacobian accumulation through `Mode::Accumulate`.
    //
    // They intentionally DO NOT cover:
    // - Transform mathematics (see `transforms`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Two readers over the same buffers return the same values.
    //
    // Given
    // -----
    // - reals = [0.1, 0.2, 0.3, 0.4], the same request sequence twice.
    //
    // Expect
    // ------
    // - Identical values and positions.
    fn decoding_is_deterministic() {
        let reals = [0.1, 0.2, 0.3, 0.4];
        let run = || {
            let mut reader = Reader::new(&reals, &[]);
            let a = reader.decode_scalar(&ConstraintKind::Positive, Mode::Constrain).unwrap();
            let b =
                reader.decode_vector(&ConstraintKind::Simplex, 4, Mode::Constrain).unwrap();
            (a, b, reader.position())
        };
        assert_eq!(run(), run());
    }

    #[test]
    // Purpose
    // -------
    // Verify the simplex raw-count law and the validate/constrain split.
    //
    // Given
    // -----
    // - A simplex of size 3 decoded in constrain mode, then in validate mode.
    //
    // Expect
    // ------
    // - Constrain consumes 2; validate consumes 3 and returns them unchanged.
    fn simplex_consumption_depends_on_mode() {
        let reals = [0.0, 0.0, 0.2, 0.3, 0.5];
        let mut reader = Reader::new(&reals, &[]);

        let x = reader.decode_vector(&ConstraintKind::Simplex, 3, Mode::Constrain).unwrap();
        assert_eq!(reader.position(), 2);
        assert_relative_eq!(x.sum(), 1.0, epsilon = 1e-12);

        let y = reader.decode_vector(&ConstraintKind::Simplex, 3, Mode::Validate).unwrap();
        assert_eq!(y, array![0.2, 0.3, 0.5]);
        assert_eq!(reader.position(), 5);
        assert!(reader.finish().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Zero-size invalid shapes fail before touching the cursor; other
    // zero sizes are no-ops.
    //
    // Given
    // -----
    // - `unit_vector(0)`, `simplex(0)`, an empty covariance, and an empty
    //   positive vector.
    //
    // Expect
    // ------
    // - `InvalidShape` for the first two; empty values for the rest; the
    //   cursor never moves.
    fn zero_sizes_are_checked_before_reading() {
        let reals = [1.0];
        let mut reader = Reader::new(&reals, &[]);

        for kind in [ConstraintKind::UnitVector, ConstraintKind::Simplex] {
            let err = reader.decode_vector(&kind, 0, Mode::Constrain).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidShape { .. }));
        }
        let cov =
            reader.decode_matrix(&ConstraintKind::Covariance, 0, 0, Mode::Constrain).unwrap();
        assert_eq!(cov.shape(), &[0, 0]);
        let pos = reader.decode_vector(&ConstraintKind::Positive, 0, Mode::Validate).unwrap();
        assert!(pos.is_empty());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Exhaustion fails without advancing; later fitting reads still work.
    //
    // Given
    // -----
    // - Two reals and a request for an ordered vector of three.
    //
    // Expect
    // ------
    // - `OutOfData { requested: 3, available: 2 }`, position 0, then a
    //   vector of two succeeds.
    fn exhaustion_leaves_cursor_in_place() {
        let reals = [1.0, 2.0];
        let mut reader = Reader::new(&reals, &[]);
        let err = reader.decode_vector(&ConstraintKind::Ordered, 3, Mode::Constrain).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfData { requested: 3, available: 2, .. }));
        assert_eq!(reader.position(), 0);
        assert!(reader.decode_vector(&ConstraintKind::Ordered, 2, Mode::Constrain).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Jacobian accumulation for positive scalars adds the raw value.
    //
    // Given
    // -----
    // - raw = [0.7, -1.2] decoded as positive with one accumulator.
    //
    // Expect
    // ------
    // - Values `exp(raw)`; `lp = 0.7 − 1.2`; constrain mode leaves a second
    //   accumulator untouched.
    fn accumulate_adds_log_jacobian() {
        let reals = [0.7, -1.2, 0.3];
        let mut reader = Reader::new(&reals, &[]);
        let mut lp = 0.0;
        let mut mode = Mode::Accumulate(&mut lp);
        let a = reader.decode_scalar(&ConstraintKind::Positive, mode.reborrow()).unwrap();
        let b = reader.decode_scalar(&ConstraintKind::Positive, mode.reborrow()).unwrap();
        let c = reader.decode_scalar(&ConstraintKind::Positive, Mode::Constrain).unwrap();
        assert_relative_eq!(a, 0.7_f64.exp());
        assert_relative_eq!(b, (-1.2_f64).exp());
        assert_relative_eq!(c, 0.3_f64.exp());
        assert_relative_eq!(lp, 0.7 - 1.2);
    }

    #[test]
    // Purpose
    // -------
    // Validate mode rejects an out-of-bounds value that constrain mode maps
    // without complaint; the accumulator never changes the value.
    //
    // Given
    // -----
    // - raw = [-1.0] read as `LowerBound(0.0)` on three independent readers.
    //
    // Expect
    // ------
    // - Validate: `ConstraintViolation`.
    // - Constrain and accumulate: identical value `e⁻¹`, `lp = -1`.
    fn validate_and_constrain_split_on_same_raw_value() {
        let reals = [-1.0];
        let kind = ConstraintKind::LowerBound(0.0);

        let err = Reader::new(&reals, &[]).decode_scalar(&kind, Mode::Validate).unwrap_err();
        assert!(matches!(err, DecodeError::ConstraintViolation { kind: "lower_bound", .. }));

        let plain = Reader::new(&reals, &[]).decode_scalar(&kind, Mode::Constrain).unwrap();
        let mut lp = 0.0;
        let acc =
            Reader::new(&reals, &[]).decode_scalar(&kind, Mode::Accumulate(&mut lp)).unwrap();
        assert_eq!(plain, acc);
        assert_relative_eq!(plain, (-1.0_f64).exp());
        assert_eq!(lp, -1.0);
    }

    #[test]
    // Purpose
    // -------
    // Requests whose raw count does not fit in `usize` fail with
    // `OutOfData` instead of overflowing.
    //
    // Given
    // -----
    // - Two raw values and 2³³×2³³ requests: elementwise positive, a
    //   correlation matrix, and a covariance matrix, in every mode.
    //
    // Expect
    // ------
    // - `OutOfData` with `requested = usize::MAX`; nothing consumed.
    fn oversized_shapes_fail_without_reading() {
        let reals = [0.1, 0.2];
        let big = 1usize << 33;
        let mut reader = Reader::new(&reals, &[]);

        for kind in [
            ConstraintKind::Positive,
            ConstraintKind::CorrelationMatrix,
            ConstraintKind::Covariance,
        ] {
            let mut lp = 0.0;
            for mode in [Mode::Validate, Mode::Constrain, Mode::Accumulate(&mut lp)] {
                let err = reader.decode_matrix(&kind, big, big, mode).unwrap_err();
                assert!(
                    matches!(
                        err,
                        DecodeError::OutOfData { requested: usize::MAX, available: 2, .. }
                    ),
                    "{kind}: {err:?}"
                );
            }
            assert_eq!(lp, 0.0);
        }
        assert_eq!(reader.position(), 0);
        assert!(reader.matrix(big, big).is_err());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Bounded reads check bounds in order after consuming.
    //
    // Given
    // -----
    // - Validate-mode reads with lb > ub, x < lb, and x > ub.
    //
    // Expect
    // ------
    // - `InconsistentBounds`, then `ConstraintViolation` for each side; each
    //   call consumes one value.
    fn bounded_reads_check_in_order() {
        let reals = [0.5, -1.0, 3.0];
        let mut reader = Reader::new(&reals, &[]);

        let err = reader
            .decode_scalar(&ConstraintKind::Bounded { lb: 2.0, ub: 1.0 }, Mode::Validate)
            .unwrap_err();
        assert!(matches!(err, DecodeError::InconsistentBounds { .. }));
        assert_eq!(reader.position(), 1);

        let kind = ConstraintKind::Bounded { lb: 0.0, ub: 2.0 };
        let err = reader.decode_scalar(&kind, Mode::Validate).unwrap_err();
        assert!(matches!(err, DecodeError::ConstraintViolation { index: 0, .. }));
        let err = reader.decode_scalar(&kind, Mode::Validate).unwrap_err();
        assert!(matches!(err, DecodeError::ConstraintViolation { .. }));
        assert_eq!(reader.position(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Integer reads: inconsistent bounds after consumption, range checks.
    //
    // Given
    // -----
    // - ints = [4, 5, 9, 2].
    //
    // Expect
    // ------
    // - `integer_lub(5, 3)` fails with `InconsistentBounds` after consuming
    //   one integer; the remaining reads behave as documented.
    fn integer_reads_check_bounds() {
        let ints = [4, 5, 9, 2];
        let mut reader = Reader::new(&[], &ints);

        let err = reader.integer_lub(5, 3).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InconsistentBounds { lb: Number::Integer(5), ub: Number::Integer(3) }
        );
        assert_eq!(reader.position_i(), 1);

        assert_eq!(reader.integer_lub(0, 5).unwrap(), 5);
        assert!(matches!(
            reader.integer_ub(8),
            Err(DecodeError::ConstraintViolation { value: Number::Integer(9), .. })
        ));
        assert_eq!(reader.integer_lb(2).unwrap(), 2);
        assert!(matches!(reader.integer(), Err(DecodeError::OutOfData { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Cholesky and covariance requests consume their packed counts.
    //
    // Given
    // -----
    // - A 3×2 Cholesky factor (5 raw) and a 2×2 covariance (3 raw).
    //
    // Expect
    // ------
    // - Positions 5 and 8; a lower-triangular factor.
    fn structured_matrices_consume_packed_counts() {
        let reals = [0.0; 8];
        let mut reader = Reader::new(&reals, &[]);
        let l =
            reader.decode_matrix(&ConstraintKind::CholeskyCov, 3, 2, Mode::Constrain).unwrap();
        assert_eq!(reader.position(), 5);
        assert_eq!(l[[0, 1]], 0.0);
        assert_eq!(l[[1, 1]], 1.0);
        let s = reader.decode_matrix(&ConstraintKind::Covariance, 2, 2, Mode::Constrain).unwrap();
        assert_eq!(reader.position(), 8);
        assert_eq!(s, array![[1.0, 0.0], [0.0, 1.0]]);
    }
}
