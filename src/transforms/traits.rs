//! The transform-library contract the reader is generic over.
//!
//! - [`Transforms`]: one constraining bijection and one validity predicate
//!   per constraint kind.
//!
//! Convention: every bijection takes `lp: Option<&mut f64>`. `None` means
//! "constrain only"; `Some(lp)` additionally adds `ln |det J|` of the map to
//! the accumulator. Implementations must return the same value either way.
use crate::transforms::{
    checks::{self, CheckResult},
    errors::TransformResult,
    matrix, scalar, vector,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Constraining transforms and validity predicates used by the reader.
///
/// Required:
/// - `tolerance()`: absolute tolerance used by the equality-style
///   predicates (simplex sums, unit norms, symmetry, unit diagonals).
///
/// Optional:
/// - Every bijection and predicate has a provided implementation backed by
///   the free functions in [`scalar`], [`vector`], [`matrix`], and
///   [`checks`]. Override individual methods to swap in a different
///   parameterization or to instrument calls.
pub trait Transforms {
    // Required methods
    fn tolerance(&self) -> f64;

    // Optional methods: scalar bijections
    fn positive(&self, x: f64, lp: Option<&mut f64>) -> f64 {
        scalar::positive(x, lp)
    }
    fn lower_bound(&self, x: f64, lb: f64, lp: Option<&mut f64>) -> f64 {
        scalar::lower_bound(x, lb, lp)
    }
    fn upper_bound(&self, x: f64, ub: f64, lp: Option<&mut f64>) -> f64 {
        scalar::upper_bound(x, ub, lp)
    }
    fn bounded(&self, x: f64, lb: f64, ub: f64, lp: Option<&mut f64>) -> TransformResult<f64> {
        scalar::bounded(x, lb, ub, lp)
    }
    fn offset_multiplier(
        &self, x: f64, offset: f64, multiplier: f64, lp: Option<&mut f64>,
    ) -> TransformResult<f64> {
        scalar::offset_multiplier(x, offset, multiplier, lp)
    }
    fn probability(&self, x: f64, lp: Option<&mut f64>) -> f64 {
        scalar::probability(x, lp)
    }
    fn correlation(&self, x: f64, lp: Option<&mut f64>) -> f64 {
        scalar::correlation(x, lp)
    }

    // Optional methods: vector bijections
    fn unit_vector(&self, y: ArrayView1<f64>, lp: Option<&mut f64>) -> TransformResult<Array1<f64>> {
        vector::unit_vector(y, lp)
    }
    fn simplex(&self, y: ArrayView1<f64>, lp: Option<&mut f64>) -> TransformResult<Array1<f64>> {
        Ok(vector::simplex(y, lp))
    }
    fn ordered(&self, y: ArrayView1<f64>, lp: Option<&mut f64>) -> TransformResult<Array1<f64>> {
        Ok(vector::ordered(y, lp))
    }
    fn positive_ordered(
        &self, y: ArrayView1<f64>, lp: Option<&mut f64>,
    ) -> TransformResult<Array1<f64>> {
        Ok(vector::positive_ordered(y, lp))
    }

    // Optional methods: matrix bijections
    fn cholesky_factor(
        &self, y: ArrayView1<f64>, n: usize, m: usize, lp: Option<&mut f64>,
    ) -> TransformResult<Array2<f64>> {
        matrix::cholesky_factor(y, n, m, lp)
    }
    fn cholesky_corr(
        &self, y: ArrayView1<f64>, k: usize, lp: Option<&mut f64>,
    ) -> TransformResult<Array2<f64>> {
        matrix::cholesky_corr(y, k, lp)
    }
    fn covariance(
        &self, y: ArrayView1<f64>, k: usize, lp: Option<&mut f64>,
    ) -> TransformResult<Array2<f64>> {
        matrix::cov_matrix(y, k, lp)
    }
    fn correlation_matrix(
        &self, y: ArrayView1<f64>, k: usize, lp: Option<&mut f64>,
    ) -> TransformResult<Array2<f64>> {
        matrix::corr_matrix(y, k, lp)
    }

    // Optional methods: predicates
    fn check_positive(&self, x: f64) -> CheckResult {
        checks::check_positive(x)
    }
    fn check_lower_bound(&self, x: f64, lb: f64) -> CheckResult {
        checks::check_lower_bound(x, lb)
    }
    fn check_upper_bound(&self, x: f64, ub: f64) -> CheckResult {
        checks::check_upper_bound(x, ub)
    }
    fn check_bounded(&self, x: f64, lb: f64, ub: f64) -> CheckResult {
        checks::check_bounded(x, lb, ub)
    }
    fn check_probability(&self, x: f64) -> CheckResult {
        checks::check_probability(x)
    }
    fn check_correlation(&self, x: f64) -> CheckResult {
        checks::check_correlation(x)
    }
    fn check_unit_vector(&self, x: ArrayView1<f64>) -> CheckResult {
        checks::check_unit_vector(x, self.tolerance())
    }
    fn check_simplex(&self, x: ArrayView1<f64>) -> CheckResult {
        checks::check_simplex(x, self.tolerance())
    }
    fn check_ordered(&self, x: ArrayView1<f64>) -> CheckResult {
        checks::check_ordered(x)
    }
    fn check_positive_ordered(&self, x: ArrayView1<f64>) -> CheckResult {
        checks::check_positive_ordered(x)
    }
    fn check_cholesky_factor(&self, x: ArrayView2<f64>) -> CheckResult {
        checks::check_cholesky_factor(x)
    }
    fn check_cholesky_corr(&self, x: ArrayView2<f64>) -> CheckResult {
        checks::check_cholesky_corr(x, self.tolerance())
    }
    fn check_covariance(&self, x: ArrayView2<f64>) -> CheckResult {
        checks::check_covariance(x, self.tolerance())
    }
    fn check_correlation_matrix(&self, x: ArrayView2<f64>) -> CheckResult {
        checks::check_correlation_matrix(x, self.tolerance())
    }
}
