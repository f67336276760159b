//! Matrix constraining bijections: Cholesky factors, covariance and
//! correlation matrices.
//!
//! Raw layouts
//! -----------
//! - `cholesky_factor(y, n, m)`: `m(m+1)/2 + (n−m)m` values. The first `m`
//!   rows are filled row by row (strict lower part, then the log of the
//!   diagonal); the remaining `n − m` rows are filled row by row unchanged.
//! - `cholesky_corr(y, K)`: `K(K−1)/2` values, row by row below the diagonal,
//!   mapped through `tanh` and then scaled onto unit-length rows.
//! - `cov_matrix(y, K)`: `K + K(K−1)/2` values laid out like a `K×K`
//!   Cholesky factor; returns `L Lᵀ`.
//! - `corr_matrix(y, K)`: `K(K−1)/2` canonical partial correlations in
//!   column order; returns `L Lᵀ` for the implied correlation factor.
//!
//! Every function checks the raw length against its shape parameters and
//! reports [`TransformError::LengthMismatch`] instead of indexing past the
//! end.
use crate::transforms::{
    errors::{TransformError, TransformResult},
    numerics::log1m,
    scalar,
};
use ndarray::{Array1, Array2, ArrayView1};

// Raw lengths saturate at `usize::MAX`, a count no buffer can supply, so an
// oversized shape fails the length check instead of wrapping.

/// `k(k+1)/2`, saturating.
fn triangular(k: usize) -> usize {
    if k % 2 == 0 {
        (k / 2).saturating_mul(k.saturating_add(1))
    } else {
        k.saturating_mul(k / 2 + 1)
    }
}

/// Raw length of an `n×m` Cholesky factor (`n ≥ m`).
pub fn cholesky_factor_len(n: usize, m: usize) -> usize {
    triangular(m).saturating_add(n.saturating_sub(m).saturating_mul(m))
}

/// Raw length of a `K×K` correlation structure: `K(K−1)/2`.
pub fn corr_len(k: usize) -> usize {
    triangular(k.saturating_sub(1))
}

/// Raw length of a `K×K` covariance matrix: `K + K(K−1)/2`.
pub fn cov_len(k: usize) -> usize {
    triangular(k)
}

fn check_len(y: &ArrayView1<f64>, expected: usize) -> TransformResult<()> {
    if y.len() != expected {
        return Err(TransformError::LengthMismatch { expected, actual: y.len() });
    }
    Ok(())
}

/// Build an `n×m` lower-triangular factor with positive diagonal.
///
/// The log-Jacobian is the sum of the raw values that became diagonal
/// entries (each passes through `exp`).
pub fn cholesky_factor(
    y: ArrayView1<f64>, n: usize, m: usize, lp: Option<&mut f64>,
) -> TransformResult<Array2<f64>> {
    check_len(&y, cholesky_factor_len(n, m))?;
    let mut out = Array2::zeros((n, m));
    let mut pos = 0;
    let mut log_diag = 0.0;
    for i in 0..m.min(n) {
        for j in 0..i {
            out[[i, j]] = y[pos];
            pos += 1;
        }
        log_diag += y[pos];
        out[[i, i]] = y[pos].exp();
        pos += 1;
    }
    for i in m..n {
        for j in 0..m {
            out[[i, j]] = y[pos];
            pos += 1;
        }
    }
    if let Some(lp) = lp {
        *lp += log_diag;
    }
    Ok(out)
}

/// Build a `K×K` Cholesky factor of a correlation matrix.
///
/// Raw values are mapped through `tanh` (with its Jacobian), then each row is
/// filled left to right so that it has unit Euclidean length:
/// `L_ij = z · sqrt(1 − Σ_{l<j} L_il²)`, `L_ii = sqrt(1 − Σ_{l<i} L_il²)`.
pub fn cholesky_corr(
    y: ArrayView1<f64>, k: usize, mut lp: Option<&mut f64>,
) -> TransformResult<Array2<f64>> {
    check_len(&y, corr_len(k))?;
    let mut out = Array2::zeros((k, k));
    if k == 0 {
        return Ok(out);
    }
    let z: Array1<f64> = y.iter().map(|&v| scalar::correlation(v, lp.as_deref_mut())).collect();
    out[[0, 0]] = 1.0;
    let mut pos = 0;
    for i in 1..k {
        out[[i, 0]] = z[pos];
        pos += 1;
        let mut sum_sqs = out[[i, 0]] * out[[i, 0]];
        for j in 1..i {
            if let Some(lp) = lp.as_deref_mut() {
                *lp += 0.5 * log1m(sum_sqs);
            }
            out[[i, j]] = z[pos] * (1.0 - sum_sqs).sqrt();
            pos += 1;
            sum_sqs += out[[i, j]] * out[[i, j]];
        }
        out[[i, i]] = (1.0 - sum_sqs).sqrt();
    }
    Ok(out)
}

/// Build a `K×K` symmetric positive-definite matrix `L Lᵀ`.
///
/// `L` is filled row by row (strict lower part, then `exp` of the diagonal).
/// The log-Jacobian of the full map is
/// `K ln 2 + Σ_k (K − k + 1) ln L_kk` (0-based `k`).
pub fn cov_matrix(
    y: ArrayView1<f64>, k: usize, lp: Option<&mut f64>,
) -> TransformResult<Array2<f64>> {
    check_len(&y, cov_len(k))?;
    let mut l = Array2::<f64>::zeros((k, k));
    let mut pos = 0;
    let mut log_det = 0.0;
    for i in 0..k {
        for j in 0..i {
            l[[i, j]] = y[pos];
            pos += 1;
        }
        l[[i, i]] = y[pos].exp();
        log_det += (k - i + 1) as f64 * y[pos];
        pos += 1;
    }
    if let Some(lp) = lp {
        *lp += k as f64 * std::f64::consts::LN_2 + log_det;
    }
    Ok(l.dot(&l.t()))
}

/// Build a `K×K` correlation matrix from canonical partial correlations.
///
/// Raw values pass through `tanh` to become CPCs in `(−1, 1)`; the CPCs fill
/// the correlation factor column by column below the diagonal, each column
/// rescaled by the mass left over from the columns before it.
pub fn corr_matrix(
    y: ArrayView1<f64>, k: usize, mut lp: Option<&mut f64>,
) -> TransformResult<Array2<f64>> {
    check_len(&y, corr_len(k))?;
    let cpcs: Array1<f64> =
        y.iter().map(|&v| scalar::correlation(v, lp.as_deref_mut())).collect();
    if let Some(lp) = lp {
        *lp += corr_factor_log_jacobian(&cpcs, k);
    }
    let l = corr_factor_from_cpcs(&cpcs, k);
    Ok(l.dot(&l.t()))
}

/// `½ Σ (K − k − 1) ln(1 − cpc²)` over the CPCs of columns `k = 1..K−2`.
fn corr_factor_log_jacobian(cpcs: &Array1<f64>, k: usize) -> f64 {
    if k < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    let mut pos = 0;
    for col in 1..=(k - 2) {
        for _ in (col + 1)..=k {
            acc += (k - col - 1) as f64 * log1m(cpcs[pos] * cpcs[pos]);
            pos += 1;
        }
    }
    0.5 * acc
}

fn corr_factor_from_cpcs(cpcs: &Array1<f64>, k: usize) -> Array2<f64> {
    match k {
        0 => return Array2::zeros((0, 0)),
        1 => return Array2::eye(1),
        _ => {}
    }
    let mut l = Array2::<f64>::zeros((k, k));
    // remaining[r - 1] holds 1 − Σ L_rc² over the columns filled so far.
    let mut remaining = Array1::<f64>::ones(k - 1);
    l[[0, 0]] = 1.0;
    for r in 1..k {
        let z = cpcs[r - 1];
        l[[r, 0]] = z;
        remaining[r - 1] = 1.0 - z * z;
    }
    let mut pos = k - 1;
    let mut pull = k - 2;
    for col in 1..(k - 1) {
        l[[col, col]] = remaining[col - 1].sqrt();
        for offset in 0..pull {
            let row = k - pull + offset;
            let z = cpcs[pos + offset];
            l[[row, col]] = z * remaining[row - 1].sqrt();
            remaining[row - 1] *= 1.0 - z * z;
        }
        pos += pull;
        pull -= 1;
    }
    l[[k - 1, k - 1]] = remaining[k - 2].sqrt();
    l
}
