//! io: decode typed, constrained parameters from flat real/integer buffers.
//!
//! Purpose
//! -------
//! Reconstruct the structured quantities a statistical model works with
//! (bounded scalars, simplices, ordered vectors, correlation and covariance
//! matrices, Cholesky factors, sparse matrices) from the flat parameter
//! vectors an optimizer or sampler produces, and optionally accumulate the
//! log-Jacobian of every constraining transform.
//!
//! Key behaviors
//! -------------
//! - [`cursor`]: two bounds-checked, forward-only cursors over `&[f64]` and
//!   `&[i64]`.
//! - [`assemble`]: vectors, row vectors, column-major matrices, and
//!   compressed-column sparse matrices from contiguous raw runs.
//! - [`kind`]: constraint kinds, shape rules, and raw-count laws.
//! - [`dispatch`]: routes a raw run through the [`Transforms`] library.
//! - [`reader`]: the [`Reader`] session tying these together; [`layout`]
//!   decodes whole named parameter lists.
//!
//! Invariants & assumptions
//! ------------------------
//! - Consumption order is declaration order. Encoders must write values in
//!   the order and counts given by [`ConstraintKind::unconstrained_len`].
//! - A request reads at most one contiguous run per stream, after all shape
//!   checks pass. Out-of-data failures read nothing.
//! - Decoded containers are freshly allocated and owned by the caller.
//!
//! Conventions
//! -----------
//! - Dense matrices are column-major in the raw stream.
//! - Violation indices are 0-based and column-major within a value.
//! - The reader logs failures through `slog`; it never prints.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module. The `tests/` integration suite
//!   drives full layouts through the standard and a recording transform
//!   library.
//!
//! [`Transforms`]: crate::transforms::Transforms
pub mod assemble;
pub mod cursor;
pub(crate) mod dispatch;
pub mod errors;
pub mod kind;
pub mod layout;
pub mod mode;
pub mod options;
pub mod reader;
pub mod shape;
pub mod value;

pub use self::cursor::Cursor;
pub use self::errors::{DecodeError, DecodeResult, Number, Stream};
pub use self::kind::ConstraintKind;
pub use self::layout::{Declaration, DecodedParams, ParamLayout, ParamSpec};
pub use self::mode::Mode;
pub use self::options::{ReaderOptions, TripletLayout};
pub use self::reader::Reader;
pub use self::shape::{Shape, SparseCoords};
pub use self::value::Value;

pub mod prelude {
    pub use super::{
        ConstraintKind, DecodeError, DecodeResult, Declaration, DecodedParams, Mode, ParamLayout, Reader,
        ReaderOptions, Shape, SparseCoords, TripletLayout, Value,
    };
}
