//! Scalar constraining bijections ℝ → constrained interval.
//!
//! Each function maps one unconstrained value into its constrained domain and,
//! when an accumulator is supplied, adds `ln |f'(x)|` to it. Passing `None`
//! skips the Jacobian entirely; the returned value is identical either way.
//!
//! | transform           | map                         | log-Jacobian                    |
//! |---------------------|-----------------------------|---------------------------------|
//! | `positive`          | `exp(x)`                    | `x`                             |
//! | `lower_bound`       | `lb + exp(x)`               | `x`                             |
//! | `upper_bound`       | `ub − exp(x)`               | `x`                             |
//! | `bounded`           | `lb + (ub − lb)·σ(x)`       | `ln(ub − lb) + ln σ + ln(1 − σ)` |
//! | `offset_multiplier` | `μ + σ·x`                   | `ln σ`                          |
//! | `probability`       | `σ(x)`                      | `ln σ + ln(1 − σ)`              |
//! | `correlation`       | `tanh(x)`                   | `ln(1 − tanh² x)`               |
//!
//! Infinite bounds degrade gracefully: `lb = −∞` / `ub = +∞` make the
//! corresponding transform the identity with no Jacobian contribution.
use crate::transforms::{
    errors::{TransformError, TransformResult},
    numerics::{inv_logit, log1m, log1m_inv_logit, log_inv_logit},
};

/// `exp(x)`; adds `x` to `lp`.
pub fn positive(x: f64, lp: Option<&mut f64>) -> f64 {
    if let Some(lp) = lp {
        *lp += x;
    }
    x.exp()
}

/// `lb + exp(x)`; identity when `lb = −∞`.
pub fn lower_bound(x: f64, lb: f64, lp: Option<&mut f64>) -> f64 {
    if lb == f64::NEG_INFINITY {
        return x;
    }
    if let Some(lp) = lp {
        *lp += x;
    }
    lb + x.exp()
}

/// `ub − exp(x)`; identity when `ub = +∞`.
pub fn upper_bound(x: f64, ub: f64, lp: Option<&mut f64>) -> f64 {
    if ub == f64::INFINITY {
        return x;
    }
    if let Some(lp) = lp {
        *lp += x;
    }
    ub - x.exp()
}

/// Map `x` into the open interval `(lb, ub)` through the logistic function.
///
/// Half-infinite intervals fall back to [`lower_bound`] / [`upper_bound`];
/// `(−∞, +∞)` is the identity.
///
/// # Errors
/// - [`TransformError::DegenerateInterval`] unless `lb < ub` (this also
///   rejects NaN bounds).
pub fn bounded(x: f64, lb: f64, ub: f64, lp: Option<&mut f64>) -> TransformResult<f64> {
    if !(lb < ub) {
        return Err(TransformError::DegenerateInterval { lb, ub });
    }
    let lb_infinite = lb == f64::NEG_INFINITY;
    let ub_infinite = ub == f64::INFINITY;
    let y = match (lb_infinite, ub_infinite) {
        (true, true) => x,
        (true, false) => upper_bound(x, ub, lp),
        (false, true) => lower_bound(x, lb, lp),
        (false, false) => {
            let width = ub - lb;
            if let Some(lp) = lp {
                *lp += width.ln() + log_inv_logit(x) + log1m_inv_logit(x);
            }
            lb + width * inv_logit(x)
        }
    };
    Ok(y)
}

/// Affine map `offset + multiplier · x`; adds `ln(multiplier)` to `lp`.
///
/// # Errors
/// - [`TransformError::InvalidOffset`] if `offset` is not finite.
/// - [`TransformError::InvalidMultiplier`] unless `multiplier` is finite and > 0.
pub fn offset_multiplier(
    x: f64, offset: f64, multiplier: f64, lp: Option<&mut f64>,
) -> TransformResult<f64> {
    if !offset.is_finite() {
        return Err(TransformError::InvalidOffset { value: offset });
    }
    if !(multiplier.is_finite() && multiplier > 0.0) {
        return Err(TransformError::InvalidMultiplier { value: multiplier });
    }
    if let Some(lp) = lp {
        *lp += multiplier.ln();
    }
    Ok(offset + multiplier * x)
}

/// Logistic map into `(0, 1)`.
pub fn probability(x: f64, lp: Option<&mut f64>) -> f64 {
    if let Some(lp) = lp {
        *lp += log_inv_logit(x) + log1m_inv_logit(x);
    }
    inv_logit(x)
}

/// `tanh(x)`, mapping into `(−1, 1)`.
pub fn correlation(x: f64, lp: Option<&mut f64>) -> f64 {
    let y = x.tanh();
    if let Some(lp) = lp {
        *lp += log1m(y * y);
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use finitediff::FiniteDiff;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Range of each scalar transform on representative raw values.
    // - Log-Jacobian terms against a central finite-difference derivative.
    // - Infinite-bound fallbacks and parameter validation.
    //
    // They intentionally DO NOT cover:
    // - How the reader consumes raw values (see `io::dispatch`).
    // -------------------------------------------------------------------------

    /// `ln |f'(x)|` by central differences.
    fn fd_log_abs_derivative(f: impl Fn(f64) -> f64, x: f64) -> f64 {
        let point: Array1<f64> = array![x];
        let grad = point.central_diff(&|v: &Array1<f64>| f(v[0]));
        grad[0].abs().ln()
    }

    /// Run a transform with a fresh accumulator and return `(value, lp)`.
    fn with_lp(f: impl Fn(Option<&mut f64>) -> f64) -> (f64, f64) {
        let mut lp = 0.0;
        let y = f(Some(&mut lp));
        (y, lp)
    }

    #[test]
    // Purpose
    // -------
    // Verify that each scalar log-Jacobian equals ln|f'(x)|.
    //
    // Given
    // -----
    // - Raw values `x ∈ {-1.3, 0.2, 2.1}`.
    // - Transforms with finite parameters: lb = 1, ub = 4, (μ, σ) = (2, 3).
    //
    // Expect
    // ------
    // - Accumulated lp matches the finite-difference log-derivative to 1e-6.
    fn log_jacobians_match_finite_differences() {
        for &x in &[-1.3, 0.2, 2.1] {
            let (_, lp) = with_lp(|lp| positive(x, lp));
            assert_relative_eq!(lp, fd_log_abs_derivative(|v| positive(v, None), x), epsilon = 1e-6);

            let (_, lp) = with_lp(|lp| lower_bound(x, 1.0, lp));
            let fd = fd_log_abs_derivative(|v| lower_bound(v, 1.0, None), x);
            assert_relative_eq!(lp, fd, epsilon = 1e-6);

            let (_, lp) = with_lp(|lp| upper_bound(x, 4.0, lp));
            let fd = fd_log_abs_derivative(|v| upper_bound(v, 4.0, None), x);
            assert_relative_eq!(lp, fd, epsilon = 1e-6);

            let (_, lp) = with_lp(|lp| bounded(x, 1.0, 4.0, lp).unwrap());
            let fd = fd_log_abs_derivative(|v| bounded(v, 1.0, 4.0, None).unwrap(), x);
            assert_relative_eq!(lp, fd, epsilon = 1e-6);

            let (_, lp) = with_lp(|lp| offset_multiplier(x, 2.0, 3.0, lp).unwrap());
            assert_relative_eq!(lp, 3.0_f64.ln(), epsilon = 1e-12);

            let (_, lp) = with_lp(|lp| probability(x, lp));
            let fd = fd_log_abs_derivative(|v| probability(v, None), x);
            assert_relative_eq!(lp, fd, epsilon = 1e-6);

            let (_, lp) = with_lp(|lp| correlation(x, lp));
            let fd = fd_log_abs_derivative(|v| correlation(v, None), x);
            assert_relative_eq!(lp, fd, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm the values land in their constrained ranges and that the
    // accumulator does not change the returned value.
    //
    // Given
    // -----
    // - Raw value `x = -0.7`.
    //
    // Expect
    // ------
    // - Values with and without an accumulator are identical.
    // - Each value lies in its documented range.
    fn values_are_in_range_and_independent_of_accumulator() {
        let x = -0.7;
        let mut lp = 0.0;

        assert_eq!(positive(x, None), positive(x, Some(&mut lp)));
        assert!(positive(x, None) > 0.0);

        let y = bounded(x, -2.0, 5.0, None).unwrap();
        assert_eq!(y, bounded(x, -2.0, 5.0, Some(&mut lp)).unwrap());
        assert!(y > -2.0 && y < 5.0);

        assert!(lower_bound(x, 3.0, None) > 3.0);
        assert!(upper_bound(x, 3.0, None) < 3.0);

        let p = probability(x, None);
        assert!(p > 0.0 && p < 1.0);
        let c = correlation(x, None);
        assert!(c > -1.0 && c < 1.0);

        assert_relative_eq!(offset_multiplier(x, 2.0, 3.0, None).unwrap(), 2.0 + 3.0 * x);
    }

    #[test]
    // Purpose
    // -------
    // Check that infinite bounds make the transforms the identity with no
    // Jacobian contribution.
    //
    // Given
    // -----
    // - `lb = -inf`, `ub = +inf`, and the half-infinite bounded intervals.
    //
    // Expect
    // ------
    // - Identity values and an untouched accumulator for the full line.
    // - Half-infinite `bounded` agrees with `lower_bound` / `upper_bound`.
    fn infinite_bounds_fall_back_to_identity_or_one_sided() {
        let x = 0.9;
        let mut lp = 0.0;
        assert_eq!(lower_bound(x, f64::NEG_INFINITY, Some(&mut lp)), x);
        assert_eq!(upper_bound(x, f64::INFINITY, Some(&mut lp)), x);
        assert_eq!(bounded(x, f64::NEG_INFINITY, f64::INFINITY, Some(&mut lp)).unwrap(), x);
        assert_eq!(lp, 0.0);

        assert_eq!(bounded(x, 1.0, f64::INFINITY, None).unwrap(), lower_bound(x, 1.0, None));
        assert_eq!(bounded(x, f64::NEG_INFINITY, 1.0, None).unwrap(), upper_bound(x, 1.0, None));
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid transform parameters are rejected with typed errors.
    //
    // Given
    // -----
    // - An empty interval `lb = ub = 1`, a reversed interval, and
    //   non-positive / non-finite multipliers and offsets.
    //
    // Expect
    // ------
    // - `DegenerateInterval`, `InvalidMultiplier`, and `InvalidOffset`.
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            bounded(0.0, 1.0, 1.0, None),
            Err(TransformError::DegenerateInterval { lb: 1.0, ub: 1.0 })
        );
        assert!(matches!(
            bounded(0.0, 2.0, 1.0, None),
            Err(TransformError::DegenerateInterval { .. })
        ));
        assert_eq!(
            offset_multiplier(0.0, 0.0, 0.0, None),
            Err(TransformError::InvalidMultiplier { value: 0.0 })
        );
        assert!(matches!(
            offset_multiplier(0.0, 0.0, f64::INFINITY, None),
            Err(TransformError::InvalidMultiplier { .. })
        ));
        assert!(matches!(
            offset_multiplier(0.0, f64::NAN, 1.0, None),
            Err(TransformError::InvalidOffset { .. })
        ));
    }
}
