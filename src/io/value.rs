//! Decoded values.
use nalgebra_sparse::CscMatrix;
use ndarray::{Array1, Array2};

/// A freshly allocated, caller-owned decoded value.
///
/// Row vectors are stored as `1×n` matrices so they keep their orientation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Scalar(f64),
    Vector(Array1<f64>),
    RowVector(Array2<f64>),
    Matrix(Array2<f64>),
    Sparse(CscMatrix<f64>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Dense matrix or row vector.
    pub fn as_matrix(&self) -> Option<&Array2<f64>> {
        match self {
            Value::Matrix(m) | Value::RowVector(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sparse(&self) -> Option<&CscMatrix<f64>> {
        match self {
            Value::Sparse(s) => Some(s),
            _ => None,
        }
    }

    /// Number of stored reals (1 for scalars and integers, nonzeros for
    /// sparse matrices).
    pub fn len(&self) -> usize {
        match self {
            Value::Integer(_) | Value::Scalar(_) => 1,
            Value::Vector(v) => v.len(),
            Value::RowVector(m) | Value::Matrix(m) => m.len(),
            Value::Sparse(s) => s.nnz(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
