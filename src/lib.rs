//! rust_paramio: decode constrained model parameters from flat vectors.
//!
//! Purpose
//! -------
//! Serve as the crate root for a constrained-parameter stream decoder. An
//! optimizer or sampler works in an unconstrained space and hands over one
//! flat real vector and one flat integer vector; this crate turns them back
//! into the typed, shaped, validity-checked values a statistical model
//! declares, and accumulates the log-Jacobian of each transform on request.
//!
//! Key behaviors
//! -------------
//! - [`io`]: the decoder. [`io::Reader`] reads requests of the form
//!   `(ConstraintKind, Shape, Mode)` in declaration order; [`io::ParamLayout`]
//!   batches a whole model's declarations.
//! - [`transforms`]: the constraining bijections, their log-Jacobians, and
//!   the validity predicates, behind the [`transforms::Transforms`] trait.
//!
//! Invariants & assumptions
//! ------------------------
//! - Buffers are borrowed for the lifetime of a reader; decoded values are
//!   owned by the caller.
//! - A decode session is sequential and single-threaded; independent
//!   sessions use independent readers.
//! - The scalar type is `f64`.
//!
//! Conventions
//! -----------
//! - Dense matrices are column-major in the raw stream.
//! - Errors are typed ([`io::DecodeError`], [`transforms::TransformError`])
//!   and never panic on invalid input.
//!
//! Downstream usage
//! ----------------
//! - Import [`io::prelude`] for the reader surface and
//!   [`transforms::prelude`] to plug in a custom transform library.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds end-to-end layout
//!   decodes.
pub mod io;
pub mod transforms;
