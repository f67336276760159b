//! Container shapes a decode request can ask for.
//!
//! - [`Shape`]: scalar, vector, row vector, dense matrix, or sparse matrix.
//! - [`SparseCoords`]: validated coordinate lists for sparse requests.
//!
//! Dense matrices are always filled column-major: element `(i, j)` of an
//! `n×m` matrix is raw value `i + j·n`.
use crate::io::errors::{DecodeError, DecodeResult};

/// Shape of a decoded container.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scalar,
    Vector(usize),
    RowVector(usize),
    Matrix(usize, usize),
    Sparse(SparseCoords),
}

impl Shape {
    /// Number of elements in the constrained container (nonzeros for sparse).
    ///
    /// Saturates at `usize::MAX` for dense shapes too large to address.
    pub fn element_count(&self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(n) | Shape::RowVector(n) => *n,
            Shape::Matrix(n, m) => n.saturating_mul(*m),
            Shape::Sparse(coords) => coords.nnz(),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(n) => write!(f, "vector[{n}]"),
            Shape::RowVector(n) => write!(f, "row_vector[{n}]"),
            Shape::Matrix(n, m) => write!(f, "matrix[{n}, {m}]"),
            Shape::Sparse(c) => {
                write!(f, "sparse_matrix[{}, {}; nnz = {}]", c.nrows(), c.ncols(), c.nnz())
            }
        }
    }
}

/// Coordinate lists of a sparse matrix, one entry per raw value.
///
/// # Invariants
/// - `rows.len() == cols.len()`.
/// - Every `rows[k] < nrows` and `cols[k] < ncols`.
/// - Duplicate pairs are allowed; their values are summed on assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseCoords {
    rows: Vec<usize>,
    cols: Vec<usize>,
    nrows: usize,
    ncols: usize,
}

impl SparseCoords {
    /// Validate coordinate lists against the matrix dimensions.
    ///
    /// # Errors
    /// - [`DecodeError::CoordinateLengthMismatch`] if the lists differ in length.
    /// - [`DecodeError::InvalidCoordinates`] for the first pair outside
    ///   `nrows × ncols`.
    ///
    /// A matrix with a zero dimension accepts any coordinates: it decodes to
    /// an empty matrix without reading.
    pub fn new(
        rows: Vec<usize>, cols: Vec<usize>, nrows: usize, ncols: usize,
    ) -> DecodeResult<Self> {
        if rows.len() != cols.len() {
            return Err(DecodeError::CoordinateLengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
            });
        }
        if nrows != 0 && ncols != 0 {
            for (index, (&row, &col)) in rows.iter().zip(cols.iter()).enumerate() {
                if row >= nrows || col >= ncols {
                    return Err(DecodeError::InvalidCoordinates {
                        index,
                        row: row as i64,
                        col: col as i64,
                        nrows,
                        ncols,
                    });
                }
            }
        }
        Ok(SparseCoords { rows, cols, nrows, ncols })
    }

    /// Build coordinates from signed indices, e.g. values read off the
    /// integer stream.
    ///
    /// # Errors
    /// - As [`SparseCoords::new`], plus [`DecodeError::InvalidCoordinates`]
    ///   for any negative index.
    pub fn from_indices(rows: &[i64], cols: &[i64], nrows: usize, ncols: usize) -> DecodeResult<Self> {
        if rows.len() != cols.len() {
            return Err(DecodeError::CoordinateLengthMismatch { rows: rows.len(), cols: cols.len() });
        }
        let mut urows = Vec::with_capacity(rows.len());
        let mut ucols = Vec::with_capacity(cols.len());
        for (index, (&row, &col)) in rows.iter().zip(cols.iter()).enumerate() {
            match (usize::try_from(row), usize::try_from(col)) {
                (Ok(r), Ok(c)) => {
                    urows.push(r);
                    ucols.push(c);
                }
                _ => return Err(DecodeError::InvalidCoordinates { index, row, col, nrows, ncols }),
            }
        }
        SparseCoords::new(urows, ucols, nrows, ncols)
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of coordinate pairs, i.e. raw values consumed.
    ///
    /// Zero when either dimension is zero, since such a matrix reads nothing.
    pub fn nnz(&self) -> usize {
        if self.is_empty_matrix() { 0 } else { self.rows.len() }
    }

    pub fn is_empty_matrix(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }
}
