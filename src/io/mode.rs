//! How a decode request treats the raw values it reads.

/// Decode mode.
///
/// - `Validate`: read constrained-space values and check the constraint.
///   No transform, no Jacobian.
/// - `Constrain`: read unconstrained values and apply the bijection.
/// - `Accumulate(lp)`: as `Constrain`, and add `ln |det J|` to `*lp`.
#[derive(Debug)]
pub enum Mode<'lp> {
    Validate,
    Constrain,
    Accumulate(&'lp mut f64),
}

impl<'lp> Mode<'lp> {
    /// Shorter-lived copy of this mode, so one mode can drive many reads.
    pub fn reborrow(&mut self) -> Mode<'_> {
        match self {
            Mode::Validate => Mode::Validate,
            Mode::Constrain => Mode::Constrain,
            Mode::Accumulate(lp) => Mode::Accumulate(&mut **lp),
        }
    }

    pub fn is_validate(&self) -> bool {
        matches!(self, Mode::Validate)
    }

    /// The accumulator, if any.
    pub fn jacobian(&mut self) -> Option<&mut f64> {
        match self {
            Mode::Accumulate(lp) => Some(&mut **lp),
            _ => None,
        }
    }
}
