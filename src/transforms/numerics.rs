//! Numerical stability helpers for the standard transform library.
//!
//! Provides guarded versions of the scalar primitives that the constraining
//! bijections are built from. Naïve forms of these overflow or lose precision
//! in the tails (`ln(1 + exp(x))` for large `x`, `ln(1 - x)` near 0, ...).
//!
//! # Provided items
//! - [`CONSTRAINT_TOLERANCE`]: absolute tolerance (default `1e-8`) used by the
//!   validity predicates for sums, norms, symmetry, and unit diagonals.
//! - [`log1p_exp`]: stable `ln(1 + exp(x))` (softplus).
//! - [`inv_logit`]: stable logistic map ℝ → (0, 1).
//! - [`log_inv_logit`], [`log1m_inv_logit`]: logs of `σ(x)` and `1 − σ(x)`.
//! - [`log1m`]: `ln(1 − x)` for `x ≤ 1`.
//!
//! # Rationale
//! The Jacobian terms of the bounded, probability, simplex, and correlation
//! transforms are sums of these quantities; evaluating them in log space keeps
//! the accumulator finite for raw values far in the tails.

/// Absolute tolerance for constraint predicates on constrained values.
///
/// Used for `|1 − Σx|` (simplex), `|1 − ‖x‖²|` (unit vectors and Cholesky
/// correlation rows), `|A_ij − A_ji|` (symmetry), and `|A_ii − 1|`
/// (correlation diagonals).
pub const CONSTRAINT_TOLERANCE: f64 = 1e-8;

/// Numerically stable softplus: `log1p_exp(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `ln(1 + exp(x)) = x + ln1p(exp(-x))`.
/// - Otherwise, it evaluates `ln1p(exp(x))` directly.
///
/// The cutoff (`x > 20.0`) keeps `f64` arithmetic well-conditioned; above it
/// the correction term is below machine precision relative to `x`.
pub fn log1p_exp(x: f64) -> f64 {
    if x > 20.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(−x))`.
///
/// Branches on the sign of `x` so the exponential is always of a
/// non-positive argument and never overflows.
pub fn inv_logit(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `ln σ(x) = −log1p_exp(−x)`.
pub fn log_inv_logit(x: f64) -> f64 {
    -log1p_exp(-x)
}

/// `ln(1 − σ(x)) = −log1p_exp(x)`.
pub fn log1m_inv_logit(x: f64) -> f64 {
    -log1p_exp(x)
}

/// `ln(1 − x)`, accurate for small `|x|`.
///
/// Returns `-inf` at `x = 1` and `NaN` for `x > 1`.
pub fn log1m(x: f64) -> f64 {
    (-x).ln_1p()
}
