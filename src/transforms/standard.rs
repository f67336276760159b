//! The default transform library.
use crate::transforms::{numerics::CONSTRAINT_TOLERANCE, traits::Transforms};

/// Standard bijections with a configurable predicate tolerance.
///
/// Uses every provided method of [`Transforms`] unchanged; only the
/// tolerance is configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardTransforms {
    pub tolerance: f64,
}

impl StandardTransforms {
    pub fn new(tolerance: f64) -> Self {
        StandardTransforms { tolerance }
    }
}

impl Default for StandardTransforms {
    fn default() -> Self {
        StandardTransforms { tolerance: CONSTRAINT_TOLERANCE }
    }
}

impl Transforms for StandardTransforms {
    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
