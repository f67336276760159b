//! Named parameter layouts decoded in one pass.
//!
//! A [`ParamLayout`] is the ordered list of named requests a model declares:
//! constrained reals as `(kind, shape)` and bounded integers off the integer
//! stream. [`Reader::decode_layout`] runs them in declaration order with a
//! single mode and collects the results in [`DecodedParams`]. Layouts also
//! report their total raw length per stream so callers can size parameter
//! buffers up front.
use crate::{
    io::{
        errors::DecodeResult, kind::ConstraintKind, mode::Mode, reader::Reader, shape::Shape,
        value::Value,
    },
    transforms::Transforms,
};
use slog::{debug, trace};

/// What one declared parameter reads.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Constrained reals from the real stream.
    Real { kind: ConstraintKind, shape: Shape },
    /// One integer in `[lb, ub]` from the integer stream; mode-independent.
    Integer { lb: i64, ub: i64 },
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Declaration::Real { kind, shape } => write!(f, "{kind} {shape}"),
            Declaration::Integer { lb, ub } => write!(f, "integer[{lb}, {ub}]"),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub declaration: Declaration,
}

impl ParamSpec {
    /// Raw reals read in the given space; integers read none.
    fn real_len(&self, validate: bool) -> DecodeResult<usize> {
        match &self.declaration {
            Declaration::Real { kind, shape } if validate => kind.constrained_len(shape),
            Declaration::Real { kind, shape } => kind.unconstrained_len(shape),
            Declaration::Integer { .. } => Ok(0),
        }
    }
}

/// Ordered parameter declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamLayout {
    params: Vec<ParamSpec>,
}

impl ParamLayout {
    pub fn new() -> Self {
        ParamLayout::default()
    }

    /// Append a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, kind: ConstraintKind, shape: Shape) -> Self {
        self.push(name, kind, shape);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, kind: ConstraintKind, shape: Shape) {
        let declaration = Declaration::Real { kind, shape };
        self.params.push(ParamSpec { name: name.into(), declaration });
    }

    /// Append an integer in `[lb, ub]` (builder style). Use `i64::MIN` /
    /// `i64::MAX` for an open side.
    pub fn with_integer(mut self, name: impl Into<String>, lb: i64, ub: i64) -> Self {
        self.push_integer(name, lb, ub);
        self
    }

    pub fn push_integer(&mut self, name: impl Into<String>, lb: i64, ub: i64) {
        let declaration = Declaration::Integer { lb, ub };
        self.params.push(ParamSpec { name: name.into(), declaration });
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Total raw values read in constrain/accumulate mode.
    ///
    /// # Errors
    /// - `InvalidShape` for the first invalid declaration.
    pub fn unconstrained_len(&self) -> DecodeResult<usize> {
        self.params
            .iter()
            .try_fold(0usize, |total, p| Ok(total.saturating_add(p.real_len(false)?)))
    }

    /// Total raw values read in validate mode.
    ///
    /// # Errors
    /// - `InvalidShape` for the first invalid declaration.
    pub fn constrained_len(&self) -> DecodeResult<usize> {
        self.params
            .iter()
            .try_fold(0usize, |total, p| Ok(total.saturating_add(p.real_len(true)?)))
    }

    /// Integers read in any mode: one per integer declaration.
    pub fn integer_len(&self) -> usize {
        self.params
            .iter()
            .filter(|p| matches!(p.declaration, Declaration::Integer { .. }))
            .count()
    }
}

/// Decoded values in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedParams {
    entries: Vec<(String, Value)>,
}

impl DecodedParams {
    /// First value declared under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl<'a, X: Transforms> Reader<'a, X> {
    /// Decode every parameter of `layout` in order under one mode.
    ///
    /// Stops at the first failure and returns it; values decoded before the
    /// failure are dropped, but their consumption stands.
    pub fn decode_layout(
        &mut self, layout: &ParamLayout, mut mode: Mode<'_>,
    ) -> DecodeResult<DecodedParams> {
        let (start, start_i) = (self.position(), self.position_i());
        let mut entries = Vec::with_capacity(layout.len());
        for spec in layout.params() {
            let value = match &spec.declaration {
                Declaration::Real { kind, shape } => self.decode(kind, shape, mode.reborrow())?,
                Declaration::Integer { lb, ub } => Value::Integer(self.integer_lub(*lb, *ub)?),
            };
            trace!(self.logger(), "decoded parameter";
                "name" => &spec.name,
                "declared" => %spec.declaration,
                "real_pos" => self.position(),
                "int_pos" => self.position_i());
            entries.push((spec.name.clone(), value));
        }
        debug!(self.logger(), "decoded layout";
            "params" => entries.len(),
            "reals_read" => self.position() - start,
            "ints_read" => self.position_i() - start_i,
            "validate" => mode.is_validate());
        Ok(DecodedParams { entries })
    }
}
