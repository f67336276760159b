//! transforms: constraining bijections, log-Jacobians, and validity checks.
//!
//! Purpose
//! -------
//! Map unconstrained real values onto constrained supports (positive reals,
//! intervals, simplices, ordered vectors, correlation and covariance
//! matrices, Cholesky factors) and report the log absolute Jacobian
//! determinant of each map. Also provide the predicates used to validate
//! values that are already in the constrained space.
//!
//! Key behaviors
//! -------------
//! - [`Transforms`] is the contract consumed by the reader in `io`. All of
//!   its methods except `tolerance` have provided implementations.
//! - [`StandardTransforms`] is the default implementation.
//! - The free functions in [`scalar`], [`vector`], and [`matrix`] are the
//!   bijections; [`checks`] holds the predicates.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bijections never panic on finite inputs of the documented length;
//!   invalid transform parameters surface as [`TransformError`].
//! - Returned values do not depend on whether an accumulator is supplied.
//!
//! Testing notes
//! -------------
//! - Scalar Jacobians are checked against central finite differences.
//! - Vector and matrix Jacobians are checked on closed-form small cases.
pub mod checks;
pub mod errors;
pub mod matrix;
pub mod numerics;
pub mod scalar;
pub mod standard;
pub mod traits;
pub mod vector;

pub use self::checks::{CheckResult, Violation};
pub use self::errors::{TransformError, TransformResult};
pub use self::numerics::CONSTRAINT_TOLERANCE;
pub use self::standard::StandardTransforms;
pub use self::traits::Transforms;

pub mod prelude {
    pub use super::{
        CONSTRAINT_TOLERANCE, CheckResult, StandardTransforms, TransformError, TransformResult,
        Transforms, Violation,
    };
}
