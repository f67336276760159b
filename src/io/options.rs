//! Reader configuration.
//!
//! - [`ReaderOptions`]: predicate tolerance and sparse triplet layout.
//! - [`TripletLayout`]: how sparse coordinate lists become stored entries.
use crate::{
    io::errors::{DecodeError, DecodeResult},
    transforms::numerics::CONSTRAINT_TOLERANCE,
};
use std::str::FromStr;

/// Stored structure of a decoded sparse matrix.
///
/// Variants:
/// - `Canonical`: one triplet per coordinate pair; duplicates are summed.
/// - `Padded`: `len` zero-valued filler triplets at `(0, 0)` precede the real
///   ones. Numeric values match `Canonical`, but the matrix may carry an
///   explicit zero at `(0, 0)`. Kept for callers that depend on the legacy
///   stored structure.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"Canonical"`, `"Padded"`). Unknown names return
/// `DecodeError::InvalidOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripletLayout {
    #[default]
    Canonical,
    Padded,
}

impl FromStr for TripletLayout {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" => Ok(TripletLayout::Canonical),
            "padded" => Ok(TripletLayout::Padded),
            _ => Err(DecodeError::InvalidOptions {
                value: s.to_string(),
                reason: "Valid triplet layouts are case insensitive 'Canonical' or 'Padded'.",
            }),
        }
    }
}

/// Reader-level configuration.
///
/// Fields:
/// - `tolerance: f64`: absolute tolerance for the equality-style validity
///   predicates (simplex sum, unit norms, symmetry, unit diagonals).
/// - `triplet_layout: TripletLayout`: sparse assembly layout.
///
/// Default:
/// - `tolerance`: `1e-8`
/// - `triplet_layout`: `Canonical`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderOptions {
    pub tolerance: f64,
    pub triplet_layout: TripletLayout,
}

impl ReaderOptions {
    /// Create validated reader options.
    ///
    /// # Errors
    /// - [`DecodeError::InvalidOptions`] unless `tolerance` is finite and > 0.
    pub fn new(tolerance: f64, triplet_layout: TripletLayout) -> DecodeResult<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(DecodeError::InvalidOptions {
                value: tolerance.to_string(),
                reason: "Tolerance must be finite and greater than zero.",
            });
        }
        Ok(ReaderOptions { tolerance, triplet_layout })
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions { tolerance: CONSTRAINT_TOLERANCE, triplet_layout: TripletLayout::Canonical }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing of triplet layouts.
    //
    // Given
    // -----
    // - Mixed-case valid names and one unknown name.
    //
    // Expect
    // ------
    // - Valid names parse; the unknown one yields `InvalidOptions`.
    fn triplet_layout_parses_case_insensitively() {
        assert_eq!("CANONICAL".parse::<TripletLayout>().unwrap(), TripletLayout::Canonical);
        assert_eq!("padded".parse::<TripletLayout>().unwrap(), TripletLayout::Padded);
        assert!(matches!(
            "dense".parse::<TripletLayout>(),
            Err(DecodeError::InvalidOptions { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Validate tolerance checks and defaults.
    //
    // Given
    // -----
    // - Zero, negative, NaN, and a valid tolerance.
    //
    // Expect
    // ------
    // - Only the valid tolerance is accepted.
    // - Default is `1e-8` with the canonical layout.
    fn options_validate_tolerance() {
        for bad in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            assert!(ReaderOptions::new(bad, TripletLayout::Canonical).is_err());
        }
        let opts = ReaderOptions::new(1e-6, TripletLayout::Padded).unwrap();
        assert_eq!(opts.tolerance, 1e-6);

        let default = ReaderOptions::default();
        assert_eq!(default.tolerance, 1e-8);
        assert_eq!(default.triplet_layout, TripletLayout::Canonical);
    }
}
