//! Constraint dispatch: turn one raw run into a typed, constrained value.
//!
//! Purpose
//! -------
//! Given a raw run already read off the cursor, apply the bijection (or the
//! validity predicate) that a [`ConstraintKind`] names and package the
//! result in the container a [`Shape`] names.
//!
//! Key behaviors
//! -------------
//! - Elementwise kinds map every element independently, in column-major
//!   order for dense containers and in coordinate order for sparse ones.
//! - Structured kinds (simplex, ordered, Cholesky, covariance, …) hand the
//!   whole run to the transform library in one call.
//! - Validate mode never calls a bijection and never touches an accumulator.
//!
//! Invariants & assumptions
//! ------------------------
//! - `raw.len()` equals the raw count for the kind, shape, and mode; the
//!   reader computes it from [`ConstraintKind::unconstrained_len`] /
//!   [`ConstraintKind::constrained_len`] before reading.
//! - Shape validity has already been checked; the fallback arms below are
//!   unreachable for checked requests and report `InvalidShape` anyway.
//! - Bound consistency (`lb ≤ ub`) is checked by the caller after the read.
use crate::{
    io::{
        assemble::{column_major, sparse_from_values},
        errors::{DecodeError, DecodeResult, Number},
        kind::ConstraintKind,
        options::TripletLayout,
        shape::Shape,
        value::Value,
    },
    transforms::{Transforms, Violation},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Apply the bijection for `kind` to `raw`, adding to `lp` when supplied.
///
/// # Errors
/// - [`DecodeError::Transform`] when the transform library rejects its
///   parameters or input.
pub(crate) fn constrain<X: Transforms>(
    transforms: &X, kind: &ConstraintKind, shape: &Shape, raw: &[f64], mut lp: Option<&mut f64>,
    layout: TripletLayout,
) -> DecodeResult<Value> {
    if kind.is_elementwise() {
        let values = raw
            .iter()
            .map(|&x| constrain_scalar(transforms, kind, x, lp.as_deref_mut()))
            .collect::<DecodeResult<Vec<f64>>>()?;
        return package(kind, shape, values, layout);
    }
    let y = ArrayView1::from(raw);
    let value = match (kind, shape) {
        (ConstraintKind::UnitVector, Shape::Vector(_)) => {
            Value::Vector(transforms.unit_vector(y, lp)?)
        }
        (ConstraintKind::Simplex, Shape::Vector(_)) => Value::Vector(transforms.simplex(y, lp)?),
        (ConstraintKind::Ordered, Shape::Vector(_)) => Value::Vector(transforms.ordered(y, lp)?),
        (ConstraintKind::PositiveOrdered, Shape::Vector(_)) => {
            Value::Vector(transforms.positive_ordered(y, lp)?)
        }
        (ConstraintKind::CholeskyCov, Shape::Matrix(n, m)) => {
            Value::Matrix(transforms.cholesky_factor(y, *n, *m, lp)?)
        }
        (ConstraintKind::CholeskyCorr, Shape::Matrix(k, _)) => {
            Value::Matrix(transforms.cholesky_corr(y, *k, lp)?)
        }
        (ConstraintKind::Covariance, Shape::Matrix(k, _)) => {
            Value::Matrix(transforms.covariance(y, *k, lp)?)
        }
        (ConstraintKind::CorrelationMatrix, Shape::Matrix(k, _)) => {
            Value::Matrix(transforms.correlation_matrix(y, *k, lp)?)
        }
        _ => return Err(unsupported(kind, shape)),
    };
    Ok(value)
}

/// Check that `raw` already satisfies `kind` and package it unchanged.
///
/// # Errors
/// - [`DecodeError::ConstraintViolation`] for the first offending element,
///   indexed column-major within the value.
pub(crate) fn validate<X: Transforms>(
    transforms: &X, kind: &ConstraintKind, shape: &Shape, raw: &[f64], layout: TripletLayout,
) -> DecodeResult<Value> {
    if kind.is_elementwise() {
        for (i, &x) in raw.iter().enumerate() {
            check_scalar(transforms, kind, x).map_err(|v| violation(kind, v.at(i)))?;
        }
        return package(kind, shape, raw.to_vec(), layout);
    }
    let y = ArrayView1::from(raw);
    let fail = |v: Violation| violation(kind, v);
    let value = match (kind, shape) {
        (ConstraintKind::UnitVector, Shape::Vector(_)) => {
            transforms.check_unit_vector(y).map_err(fail)?;
            Value::Vector(y.to_owned())
        }
        (ConstraintKind::Simplex, Shape::Vector(_)) => {
            transforms.check_simplex(y).map_err(fail)?;
            Value::Vector(y.to_owned())
        }
        (ConstraintKind::Ordered, Shape::Vector(_)) => {
            transforms.check_ordered(y).map_err(fail)?;
            Value::Vector(y.to_owned())
        }
        (ConstraintKind::PositiveOrdered, Shape::Vector(_)) => {
            transforms.check_positive_ordered(y).map_err(fail)?;
            Value::Vector(y.to_owned())
        }
        (ConstraintKind::CholeskyCov, Shape::Matrix(n, m)) => {
            let x = column_major(raw, *n, *m)?;
            transforms.check_cholesky_factor(x.view()).map_err(fail)?;
            Value::Matrix(x)
        }
        (ConstraintKind::CholeskyCorr, Shape::Matrix(k, _)) => {
            let x = column_major(raw, *k, *k)?;
            transforms.check_cholesky_corr(x.view()).map_err(fail)?;
            Value::Matrix(x)
        }
        (ConstraintKind::Covariance, Shape::Matrix(k, _)) => {
            let x = column_major(raw, *k, *k)?;
            transforms.check_covariance(x.view()).map_err(fail)?;
            Value::Matrix(x)
        }
        (ConstraintKind::CorrelationMatrix, Shape::Matrix(k, _)) => {
            let x = column_major(raw, *k, *k)?;
            transforms.check_correlation_matrix(x.view()).map_err(fail)?;
            Value::Matrix(x)
        }
        _ => return Err(unsupported(kind, shape)),
    };
    Ok(value)
}

fn constrain_scalar<X: Transforms>(
    transforms: &X, kind: &ConstraintKind, x: f64, lp: Option<&mut f64>,
) -> DecodeResult<f64> {
    let y = match *kind {
        ConstraintKind::Positive => transforms.positive(x, lp),
        ConstraintKind::LowerBound(lb) => transforms.lower_bound(x, lb, lp),
        ConstraintKind::UpperBound(ub) => transforms.upper_bound(x, ub, lp),
        ConstraintKind::Bounded { lb, ub } => transforms.bounded(x, lb, ub, lp)?,
        ConstraintKind::OffsetMultiplier { offset, multiplier } => {
            transforms.offset_multiplier(x, offset, multiplier, lp)?
        }
        ConstraintKind::Probability => transforms.probability(x, lp),
        ConstraintKind::Correlation => transforms.correlation(x, lp),
        _ => x,
    };
    Ok(y)
}

fn check_scalar<X: Transforms>(
    transforms: &X, kind: &ConstraintKind, x: f64,
) -> Result<(), Violation> {
    match *kind {
        ConstraintKind::Positive => transforms.check_positive(x),
        ConstraintKind::LowerBound(lb) => transforms.check_lower_bound(x, lb),
        ConstraintKind::UpperBound(ub) => transforms.check_upper_bound(x, ub),
        ConstraintKind::Bounded { lb, ub } => transforms.check_bounded(x, lb, ub),
        ConstraintKind::Probability => transforms.check_probability(x),
        ConstraintKind::Correlation => transforms.check_correlation(x),
        // Unconstrained and offset/multiplier values have full support.
        _ => Ok(()),
    }
}

/// Wrap elementwise results in the container `shape` names.
fn package(
    kind: &ConstraintKind, shape: &Shape, values: Vec<f64>, layout: TripletLayout,
) -> DecodeResult<Value> {
    let value = match shape {
        Shape::Scalar => match values.first() {
            Some(&x) => Value::Scalar(x),
            None => return Err(unsupported(kind, shape)),
        },
        Shape::Vector(_) => Value::Vector(Array1::from(values)),
        Shape::RowVector(m) => {
            Value::RowVector(Array2::from_shape_fn((1, *m), |(_, j)| values[j]))
        }
        Shape::Matrix(n, m) => Value::Matrix(column_major(&values, *n, *m)?),
        Shape::Sparse(coords) => Value::Sparse(sparse_from_values(coords, &values, layout)),
    };
    Ok(value)
}

fn violation(kind: &ConstraintKind, v: Violation) -> DecodeError {
    DecodeError::ConstraintViolation {
        kind: kind.name(),
        value: Number::Real(v.value),
        index: v.index,
        reason: v.reason,
    }
}

fn unsupported(kind: &ConstraintKind, shape: &Shape) -> DecodeError {
    DecodeError::InvalidShape {
        kind: kind.name(),
        size: shape.to_string(),
        reason: "unsupported kind/shape combination",
    }
}
