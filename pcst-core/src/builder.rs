//! Builder utilities for configuring the solver.
//!
//! Validates solver parameters before constructing [`PcstFast`] instances.

use crate::{
    Result,
    error::PcstError,
    pcst::{DEFAULT_TIGHTNESS_EPSILON, PcstFast},
};

/// Configures and constructs [`PcstFast`] instances.
///
/// # Examples
/// ```
/// use pcst_core::PcstBuilder;
///
/// let solver = PcstBuilder::new()
///     .with_tightness_epsilon(1e-9)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(solver.tightness_epsilon(), 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PcstBuilder {
    tightness_epsilon: f64,
}

impl Default for PcstBuilder {
    fn default() -> Self {
        Self {
            tightness_epsilon: DEFAULT_TIGHTNESS_EPSILON,
        }
    }
}

impl PcstBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use pcst_core::PcstBuilder;
    ///
    /// assert_eq!(PcstBuilder::new().tightness_epsilon(), 1e-6);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the relative tolerance under which an edge counts as fully
    /// paid.
    #[must_use]
    pub const fn with_tightness_epsilon(mut self, epsilon: f64) -> Self {
        self.tightness_epsilon = epsilon;
        self
    }

    /// Returns the configured tightness epsilon.
    #[must_use]
    pub const fn tightness_epsilon(&self) -> f64 {
        self.tightness_epsilon
    }

    /// Validates the configuration and constructs a [`PcstFast`] instance.
    ///
    /// # Errors
    /// Returns [`PcstError::InvalidEpsilon`] unless the epsilon is finite
    /// and within `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use pcst_core::{PcstBuilder, PcstErrorCode};
    ///
    /// let err = PcstBuilder::new()
    ///     .with_tightness_epsilon(1.0)
    ///     .build()
    ///     .expect_err("epsilon of one is rejected");
    /// assert_eq!(err.code(), PcstErrorCode::InvalidEpsilon);
    /// ```
    pub fn build(self) -> Result<PcstFast> {
        let epsilon = self.tightness_epsilon;
        if !epsilon.is_finite() || !(0.0..1.0).contains(&epsilon) {
            return Err(PcstError::InvalidEpsilon { got: epsilon });
        }
        Ok(PcstFast::new(epsilon))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(0.0)]
    #[case::default(1e-6)]
    #[case::loose(0.5)]
    fn accepts_epsilon_in_range(#[case] epsilon: f64) {
        let solver = PcstBuilder::new()
            .with_tightness_epsilon(epsilon)
            .build()
            .expect("epsilon is valid");
        assert_eq!(solver.tightness_epsilon(), epsilon);
    }

    #[rstest]
    #[case::negative(-1e-9)]
    #[case::one(1.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_epsilon_out_of_range(#[case] epsilon: f64) {
        let err = PcstBuilder::new()
            .with_tightness_epsilon(epsilon)
            .build()
            .expect_err("epsilon must be rejected");
        assert!(matches!(err, PcstError::InvalidEpsilon { .. }));
    }

    #[test]
    fn default_matches_solver_default() {
        let built = PcstBuilder::default().build().expect("defaults are valid");
        assert_eq!(built, PcstFast::default());
    }
}
