//! Constraint kinds and their raw-count laws.
//!
//! | kind                                   | shapes          | raw count (unconstrained) |
//! |----------------------------------------|-----------------|---------------------------|
//! | elementwise (`Unconstrained`, bounds…) | any             | element count             |
//! | `UnitVector`                           | `Vector(k)`, k>0 | k                        |
//! | `Simplex`                              | `Vector(k)`, k>0 | k − 1                    |
//! | `Ordered`, `PositiveOrdered`           | `Vector(k)`     | k                         |
//! | `CholeskyCov`                          | `Matrix(n, m)`, n ≥ m > 0 | m(m+1)/2 + (n−m)m |
//! | `CholeskyCorr`                         | `Matrix(K, K)`, K>0 | K(K−1)/2              |
//! | `Covariance`                           | `Matrix(k, k)`  | k + k(k−1)/2              |
//! | `CorrelationMatrix`                    | `Matrix(k, k)`  | k(k−1)/2                  |
//!
//! Validate mode always reads the constrained element count.
use crate::{
    io::{
        errors::{DecodeError, DecodeResult},
        shape::Shape,
    },
    transforms::matrix::{cholesky_factor_len, corr_len, cov_len},
};

/// What constraint a decoded value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintKind {
    Unconstrained,
    Positive,
    LowerBound(f64),
    UpperBound(f64),
    Bounded { lb: f64, ub: f64 },
    OffsetMultiplier { offset: f64, multiplier: f64 },
    Probability,
    Correlation,
    UnitVector,
    Simplex,
    Ordered,
    PositiveOrdered,
    CholeskyCov,
    CholeskyCorr,
    Covariance,
    CorrelationMatrix,
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Unconstrained => "unconstrained",
            ConstraintKind::Positive => "positive",
            ConstraintKind::LowerBound(_) => "lower_bound",
            ConstraintKind::UpperBound(_) => "upper_bound",
            ConstraintKind::Bounded { .. } => "bounded",
            ConstraintKind::OffsetMultiplier { .. } => "offset_multiplier",
            ConstraintKind::Probability => "probability",
            ConstraintKind::Correlation => "correlation",
            ConstraintKind::UnitVector => "unit_vector",
            ConstraintKind::Simplex => "simplex",
            ConstraintKind::Ordered => "ordered",
            ConstraintKind::PositiveOrdered => "positive_ordered",
            ConstraintKind::CholeskyCov => "cholesky_factor_cov",
            ConstraintKind::CholeskyCorr => "cholesky_factor_corr",
            ConstraintKind::Covariance => "cov_matrix",
            ConstraintKind::CorrelationMatrix => "corr_matrix",
        }
    }

    /// `true` for kinds applied independently to every element of any shape.
    pub fn is_elementwise(&self) -> bool {
        matches!(
            self,
            ConstraintKind::Unconstrained
                | ConstraintKind::Positive
                | ConstraintKind::LowerBound(_)
                | ConstraintKind::UpperBound(_)
                | ConstraintKind::Bounded { .. }
                | ConstraintKind::OffsetMultiplier { .. }
                | ConstraintKind::Probability
                | ConstraintKind::Correlation
        )
    }

    /// Reject kind/shape combinations before anything is read.
    ///
    /// # Errors
    /// - [`DecodeError::InvalidShape`] when the shape is the wrong container
    ///   for the kind or has a size the kind cannot take (see module table).
    pub fn check_shape(&self, shape: &Shape) -> DecodeResult<()> {
        if self.is_elementwise() {
            return Ok(());
        }
        let invalid = |reason: &'static str| {
            Err(DecodeError::InvalidShape { kind: self.name(), size: shape.to_string(), reason })
        };
        match (self, shape) {
            (ConstraintKind::UnitVector | ConstraintKind::Simplex, Shape::Vector(0)) => {
                invalid("size must be greater than zero")
            }
            (
                ConstraintKind::UnitVector
                | ConstraintKind::Simplex
                | ConstraintKind::Ordered
                | ConstraintKind::PositiveOrdered,
                Shape::Vector(_),
            ) => Ok(()),
            (
                ConstraintKind::UnitVector
                | ConstraintKind::Simplex
                | ConstraintKind::Ordered
                | ConstraintKind::PositiveOrdered,
                _,
            ) => invalid("requires a column vector"),
            (ConstraintKind::CholeskyCov, Shape::Matrix(n, m)) => {
                if *m == 0 {
                    invalid("number of columns must be greater than zero")
                } else if n < m {
                    invalid("number of rows must be at least the number of columns")
                } else {
                    Ok(())
                }
            }
            (ConstraintKind::CholeskyCorr, Shape::Matrix(n, m)) => {
                if n != m {
                    invalid("requires a square matrix")
                } else if *n == 0 {
                    invalid("size must be greater than zero")
                } else {
                    Ok(())
                }
            }
            (ConstraintKind::Covariance | ConstraintKind::CorrelationMatrix, Shape::Matrix(n, m)) => {
                if n != m { invalid("requires a square matrix") } else { Ok(()) }
            }
            _ => invalid("requires a dense matrix"),
        }
    }

    /// Raw values read in constrain/accumulate mode.
    ///
    /// # Errors
    /// - As [`ConstraintKind::check_shape`].
    pub fn unconstrained_len(&self, shape: &Shape) -> DecodeResult<usize> {
        self.check_shape(shape)?;
        let len = match (self, shape) {
            (ConstraintKind::Simplex, Shape::Vector(k)) => k - 1,
            (ConstraintKind::CholeskyCov, Shape::Matrix(n, m)) => cholesky_factor_len(*n, *m),
            (ConstraintKind::CholeskyCorr | ConstraintKind::CorrelationMatrix, Shape::Matrix(k, _)) => {
                corr_len(*k)
            }
            (ConstraintKind::Covariance, Shape::Matrix(k, _)) => cov_len(*k),
            _ => shape.element_count(),
        };
        Ok(len)
    }

    /// Raw values read in validate mode: the constrained element count.
    ///
    /// # Errors
    /// - As [`ConstraintKind::check_shape`].
    pub fn constrained_len(&self, shape: &Shape) -> DecodeResult<usize> {
        self.check_shape(shape)?;
        Ok(shape.element_count())
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::LowerBound(lb) => write!(f, "lower_bound({lb})"),
            ConstraintKind::UpperBound(ub) => write!(f, "upper_bound({ub})"),
            ConstraintKind::Bounded { lb, ub } => write!(f, "bounded({lb}, {ub})"),
            ConstraintKind::OffsetMultiplier { offset, multiplier } => {
                write!(f, "offset_multiplier({offset}, {multiplier})")
            }
            other => write!(f, "{}", other.name()),
        }
    }
}
