use hypersearch_core::DomainMapper;
use thiserror::Error;

/// Errors from validating search bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("bounds must be finite, got [{lower}, {upper}]")]
    NonFinite { lower: f64, upper: f64 },

    #[error("tolerance must lie strictly between 0 and 1, got {0}")]
    Tolerance(f64),

    #[error("log-space search needs positive bounds, got [{lower}, {upper}]")]
    NonPositive { lower: f64, upper: f64 },
}

/// The interval to search and the relative convergence tolerance.
///
/// Reversed bounds are swapped on construction, so `lower <= upper` always
/// holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    lower: f64,
    upper: f64,
    tolerance: f64,
}

impl SearchBounds {
    /// Default relative tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;

    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not finite or the tolerance is
    /// outside `(0, 1)`.
    pub fn new(lower: f64, upper: f64, tolerance: f64) -> Result<Self, BoundsError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(BoundsError::NonFinite { lower, upper });
        }
        if !(tolerance > 0.0 && tolerance < 1.0) {
            return Err(BoundsError::Tolerance(tolerance));
        }

        let (lower, upper) = if lower > upper {
            (upper, lower)
        } else {
            (lower, upper)
        };

        Ok(Self {
            lower,
            upper,
            tolerance,
        })
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the bounds as search coordinates under `mapper`.
    ///
    /// In log-space the bounds are replaced by their natural logarithms; the
    /// original bounds are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if log-space is active and a bound is not positive.
    pub fn mapped(&self, mapper: &DomainMapper) -> Result<[f64; 2], BoundsError> {
        if mapper.is_log_space() && self.lower <= 0.0 {
            return Err(BoundsError::NonPositive {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok([
            mapper.to_coordinate(self.lower),
            mapper.to_coordinate(self.upper),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reversed_bounds_are_swapped() {
        let bounds = SearchBounds::new(10.0, 1.0, 0.01).unwrap();
        assert_eq!(bounds.lower(), 1.0);
        assert_eq!(bounds.upper(), 10.0);
    }

    #[test]
    fn tolerance_must_be_a_fraction() {
        for tolerance in [0.0, 1.0, -0.5, f64::NAN] {
            assert!(matches!(
                SearchBounds::new(0.0, 1.0, tolerance),
                Err(BoundsError::Tolerance(_))
            ));
        }
    }

    #[test]
    fn bounds_must_be_finite() {
        assert!(matches!(
            SearchBounds::new(0.0, f64::INFINITY, 0.1),
            Err(BoundsError::NonFinite { .. })
        ));
    }

    #[test]
    fn linear_mapping_is_identity() {
        let bounds = SearchBounds::new(-2.0, 3.0, 0.1).unwrap();
        assert_eq!(bounds.mapped(&DomainMapper::default()).unwrap(), [-2.0, 3.0]);
    }

    #[test]
    fn log_mapping_takes_logarithms() {
        let bounds = SearchBounds::new(1e-6, 1e-1, 0.1).unwrap();
        let [low, high] = bounds.mapped(&DomainMapper::new(true, false)).unwrap();

        assert_relative_eq!(low, 1e-6_f64.ln());
        assert_relative_eq!(high, 1e-1_f64.ln());
        assert_eq!(bounds.lower(), 1e-6);
    }

    #[test]
    fn log_mapping_rejects_non_positive_bounds() {
        let bounds = SearchBounds::new(0.0, 1.0, 0.1).unwrap();
        assert!(matches!(
            bounds.mapped(&DomainMapper::new(true, false)),
            Err(BoundsError::NonPositive { .. })
        ));
    }
}
