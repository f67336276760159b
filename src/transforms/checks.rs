//! Validity predicates for constrained values.
//!
//! These back the reader's *validate* mode: values are read directly in the
//! constrained space and must already satisfy their constraint. Each
//! predicate returns `Ok(())` or the first [`Violation`] found, scanning in
//! column-major order.
//!
//! Conventions
//! -----------
//! - Comparisons are written as `!(ok)` so that NaN always fails.
//! - `index` is the flat column-major position of the offending element
//!   within the checked container (0 for scalars); the reader rebases it for
//!   elementwise containers.
//! - Tolerances are absolute and apply only to equalities (sums, norms,
//!   symmetry, unit diagonals); inequalities are exact.
use nalgebra::DMatrix;
use ndarray::{ArrayView1, ArrayView2};

/// First element that failed a validity predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub value: f64,
    pub index: usize,
    pub reason: String,
}

impl Violation {
    pub fn new(value: f64, index: usize, reason: impl Into<String>) -> Self {
        Violation { value, index, reason: reason.into() }
    }

    /// Shift the index by `offset` (used when checking elements one by one).
    pub fn at(mut self, offset: usize) -> Self {
        self.index += offset;
        self
    }
}

pub type CheckResult = Result<(), Violation>;

fn fail(value: f64, index: usize, reason: impl Into<String>) -> CheckResult {
    Err(Violation::new(value, index, reason))
}

// ---- Scalars ----------------------------------------------------------------

pub fn check_positive(x: f64) -> CheckResult {
    if !(x > 0.0) {
        return fail(x, 0, "must be positive");
    }
    Ok(())
}

pub fn check_lower_bound(x: f64, lb: f64) -> CheckResult {
    if !(x >= lb) {
        return fail(x, 0, format!("must be greater than or equal to {lb}"));
    }
    Ok(())
}

pub fn check_upper_bound(x: f64, ub: f64) -> CheckResult {
    if !(x <= ub) {
        return fail(x, 0, format!("must be less than or equal to {ub}"));
    }
    Ok(())
}

pub fn check_bounded(x: f64, lb: f64, ub: f64) -> CheckResult {
    check_lower_bound(x, lb)?;
    check_upper_bound(x, ub)
}

pub fn check_probability(x: f64) -> CheckResult {
    if !((0.0..=1.0).contains(&x)) {
        return fail(x, 0, "must be a probability in [0, 1]");
    }
    Ok(())
}

pub fn check_correlation(x: f64) -> CheckResult {
    if !((-1.0..=1.0).contains(&x)) {
        return fail(x, 0, "must be a correlation in [-1, 1]");
    }
    Ok(())
}

// ---- Vectors ----------------------------------------------------------------

/// `|1 − ‖x‖²| ≤ tol`.
pub fn check_unit_vector(x: ArrayView1<f64>, tol: f64) -> CheckResult {
    let squared_norm = x.dot(&x);
    if !((1.0 - squared_norm).abs() <= tol) {
        return fail(squared_norm, 0, "squared norm must be 1");
    }
    Ok(())
}

/// Non-negative entries with `|1 − Σx| ≤ tol`.
pub fn check_simplex(x: ArrayView1<f64>, tol: f64) -> CheckResult {
    for (i, &v) in x.iter().enumerate() {
        if !(v >= 0.0) {
            return fail(v, i, "simplex entries must be non-negative");
        }
    }
    let total = x.sum();
    if !((1.0 - total).abs() <= tol) {
        return fail(total, 0, "simplex entries must sum to 1");
    }
    Ok(())
}

/// Strictly increasing.
pub fn check_ordered(x: ArrayView1<f64>) -> CheckResult {
    for i in 1..x.len() {
        if !(x[i] > x[i - 1]) {
            return fail(x[i], i, "must be strictly greater than the previous element");
        }
    }
    Ok(())
}

/// First entry non-negative, then strictly increasing.
pub fn check_positive_ordered(x: ArrayView1<f64>) -> CheckResult {
    if let Some(&first) = x.get(0) {
        if !(first >= 0.0) {
            return fail(first, 0, "first element must be non-negative");
        }
    }
    check_ordered(x)
}

// ---- Matrices ---------------------------------------------------------------

fn flat(i: usize, j: usize, nrows: usize) -> usize {
    i + j * nrows
}

/// Lower triangular (upper part exactly zero) with a positive diagonal.
pub fn check_cholesky_factor(x: ArrayView2<f64>) -> CheckResult {
    let (n, m) = x.dim();
    for j in 0..m {
        for i in 0..n {
            let v = x[[i, j]];
            if i < j && v != 0.0 {
                return fail(v, flat(i, j, n), "entries above the diagonal must be zero");
            }
            if i == j && !(v > 0.0) {
                return fail(v, flat(i, j, n), "diagonal entries must be positive");
            }
        }
    }
    Ok(())
}

/// A square Cholesky factor whose rows all have unit length.
pub fn check_cholesky_corr(x: ArrayView2<f64>, tol: f64) -> CheckResult {
    check_cholesky_factor(x)?;
    let n = x.nrows();
    for (i, row) in x.outer_iter().enumerate() {
        let squared_norm = row.dot(&row);
        if !((1.0 - squared_norm).abs() <= tol) {
            return fail(squared_norm, flat(i, i, n), "rows must have unit length");
        }
    }
    Ok(())
}

/// Finite, symmetric within `tol`, and positive definite.
pub fn check_covariance(x: ArrayView2<f64>, tol: f64) -> CheckResult {
    let n = x.nrows();
    for j in 0..n {
        for i in 0..n {
            let v = x[[i, j]];
            if !v.is_finite() {
                return fail(v, flat(i, j, n), "entries must be finite");
            }
            if i > j && !((v - x[[j, i]]).abs() <= tol) {
                return fail(v, flat(i, j, n), "matrix must be symmetric");
            }
        }
    }
    check_positive_definite(x)
}

/// A covariance matrix with unit diagonal (within `tol`).
pub fn check_correlation_matrix(x: ArrayView2<f64>, tol: f64) -> CheckResult {
    let n = x.nrows();
    for i in 0..n {
        let v = x[[i, i]];
        if !((v - 1.0).abs() <= tol) {
            return fail(v, flat(i, i, n), "diagonal entries must be 1");
        }
    }
    check_covariance(x, tol)
}

/// Cholesky succeeds on the lower triangle; on failure the smallest
/// eigenvalue is reported as the offending value.
fn check_positive_definite(x: ArrayView2<f64>) -> CheckResult {
    let n = x.nrows();
    if n == 0 {
        return Ok(());
    }
    let mut dense = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(x, &mut dense);
    if dense.clone().cholesky().is_some() {
        return Ok(());
    }
    let min_eigenvalue = dense.symmetric_eigenvalues().min();
    fail(min_eigenvalue, 0, "matrix must be positive definite")
}

/// Copy a square `ndarray` matrix into a `DMatrix`, column by column.
fn fill_dmatrix(src: ArrayView2<f64>, dst: &mut DMatrix<f64>) {
    let n = src.ncols();
    for j in 0..n {
        for i in 0..n {
            dst[(i, j)] = src[[i, j]];
        }
    }
}
