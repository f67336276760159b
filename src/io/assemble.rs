//! Shape assembly from contiguous raw runs.
//!
//! Each function performs exactly one bounds-checked bulk read, so a request
//! either consumes its full run or nothing. Zero-size requests read nothing
//! and yield empty containers.
//!
//! Dense matrices are column-major: element `(i, j)` of an `n×m` matrix is
//! raw value `i + j·n`. Sparse matrices take one raw value per coordinate
//! pair, in coordinate order.
use crate::io::{
    cursor::Cursor,
    errors::{DecodeError, DecodeResult},
    options::TripletLayout,
    shape::{Shape, SparseCoords},
};
use nalgebra_sparse::{CooMatrix, CscMatrix};
use ndarray::{Array1, Array2, ShapeBuilder};

pub fn vector(cursor: &mut Cursor<'_>, m: usize) -> DecodeResult<Array1<f64>> {
    Ok(Array1::from(cursor.next_scalars(m)?.to_vec()))
}

pub fn std_vector(cursor: &mut Cursor<'_>, m: usize) -> DecodeResult<Vec<f64>> {
    Ok(cursor.next_scalars(m)?.to_vec())
}

/// `1×m` matrix.
pub fn row_vector(cursor: &mut Cursor<'_>, m: usize) -> DecodeResult<Array2<f64>> {
    let raw = cursor.next_scalars(m)?;
    Ok(Array2::from_shape_fn((1, m), |(_, j)| raw[j]))
}

/// `n×m` matrix, column-major.
///
/// # Errors
/// - [`DecodeError::OutOfData`] if `n·m` exceeds the remaining reals; an
///   unaddressable `n·m` saturates to `usize::MAX` and fails the same way.
/// - [`DecodeError::InvalidShape`] for an empty matrix whose nonzero
///   dimension is too large to address.
pub fn matrix(cursor: &mut Cursor<'_>, n: usize, m: usize) -> DecodeResult<Array2<f64>> {
    let raw = cursor.next_scalars(n.saturating_mul(m))?;
    column_major(raw, n, m)
}

/// Read one value per coordinate pair and assemble a compressed-column
/// matrix; a zero dimension reads nothing.
pub fn sparse_matrix(
    cursor: &mut Cursor<'_>, coords: &SparseCoords, layout: TripletLayout,
) -> DecodeResult<CscMatrix<f64>> {
    let raw = cursor.next_scalars(coords.nnz())?;
    Ok(sparse_from_values(coords, raw, layout))
}

/// Reshape a run of `n·m` values into an `n×m` matrix, column-major.
pub(crate) fn column_major(raw: &[f64], n: usize, m: usize) -> DecodeResult<Array2<f64>> {
    Array2::from_shape_vec((n, m).f(), raw.to_vec()).map_err(|_| DecodeError::InvalidShape {
        kind: "matrix",
        size: Shape::Matrix(n, m).to_string(),
        reason: "dimensions exceed the addressable size",
    })
}

/// Assemble `values[k]` at `(rows[k], cols[k])`, summing duplicates.
///
/// `values.len()` must equal `coords.nnz()`.
pub(crate) fn sparse_from_values(
    coords: &SparseCoords, values: &[f64], layout: TripletLayout,
) -> CscMatrix<f64> {
    let mut coo = CooMatrix::new(coords.nrows(), coords.ncols());
    if coords.is_empty_matrix() {
        return CscMatrix::from(&coo);
    }
    if layout == TripletLayout::Padded {
        for _ in 0..values.len() {
            coo.push(0, 0, 0.0);
        }
    }
    for ((&row, &col), &value) in coords.rows().iter().zip(coords.cols()).zip(values) {
        coo.push(row, col, value);
    }
    CscMatrix::from(&coo)
}
