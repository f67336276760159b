//! Vector constraining bijections.
//!
//! | transform          | raw length | output length | constrained domain            |
//! |--------------------|------------|---------------|-------------------------------|
//! | `unit_vector`      | k          | k             | ‖x‖₂ = 1                      |
//! | `simplex`          | k − 1      | k             | x ≥ 0, Σx = 1                 |
//! | `ordered`          | k          | k             | x₀ < x₁ < … < x_{k−1}         |
//! | `positive_ordered` | k          | k             | 0 < x₀ < x₁ < … < x_{k−1}     |
//!
//! The simplex uses the stick-breaking construction with a `ln(K − 1 − k)`
//! centering shift, so a zero raw vector maps to the uniform simplex.
use crate::transforms::{
    errors::{TransformError, TransformResult},
    numerics::{inv_logit, log1p_exp},
};
use ndarray::{Array1, ArrayView1};

/// Normalize `y` to unit Euclidean length; adds `−½‖y‖²` to `lp`.
///
/// # Errors
/// - [`TransformError::ZeroNorm`] if `‖y‖²` is zero or not finite.
pub fn unit_vector(y: ArrayView1<f64>, lp: Option<&mut f64>) -> TransformResult<Array1<f64>> {
    let squared_norm = y.dot(&y);
    if !(squared_norm.is_finite() && squared_norm > 0.0) {
        return Err(TransformError::ZeroNorm { squared_norm });
    }
    if let Some(lp) = lp {
        *lp -= 0.5 * squared_norm;
    }
    Ok(y.mapv(|v| v / squared_norm.sqrt()))
}

/// Stick-breaking map from `K − 1` raw values onto the `K`-simplex.
///
/// For `k = 0..K−1`:
/// `z_k = σ(y_k − ln(K − 1 − k))`, `x_k = stick · z_k`, `stick −= x_k`;
/// the last coordinate receives the remaining stick.
///
/// An empty `y` yields the one-point simplex `[1.0]`.
pub fn simplex(y: ArrayView1<f64>, mut lp: Option<&mut f64>) -> Array1<f64> {
    let km1 = y.len();
    let mut x = Array1::zeros(km1 + 1);
    let mut stick = 1.0_f64;
    for (k, &yk) in y.iter().enumerate() {
        let adj = yk - ((km1 - k) as f64).ln();
        x[k] = stick * inv_logit(adj);
        if let Some(lp) = lp.as_deref_mut() {
            *lp += stick.ln() - log1p_exp(-adj) - log1p_exp(adj);
        }
        stick -= x[k];
    }
    x[km1] = stick;
    x
}

/// `x₀ = y₀`, `x_i = x_{i−1} + exp(y_i)`; adds `Σ_{i≥1} y_i` to `lp`.
pub fn ordered(y: ArrayView1<f64>, lp: Option<&mut f64>) -> Array1<f64> {
    let mut x = Array1::zeros(y.len());
    if y.is_empty() {
        return x;
    }
    x[0] = y[0];
    for i in 1..y.len() {
        x[i] = x[i - 1] + y[i].exp();
    }
    if let Some(lp) = lp {
        *lp += y.iter().skip(1).sum::<f64>();
    }
    x
}

/// `x₀ = exp(y₀)`, `x_i = x_{i−1} + exp(y_i)`; adds `Σ y_i` to `lp`.
pub fn positive_ordered(y: ArrayView1<f64>, lp: Option<&mut f64>) -> Array1<f64> {
    let mut x = Array1::zeros(y.len());
    let mut running = 0.0;
    for (xi, &yi) in x.iter_mut().zip(y.iter()) {
        running += yi.exp();
        *xi = running;
    }
    if let Some(lp) = lp {
        *lp += y.sum();
    }
    x
}
