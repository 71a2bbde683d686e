/// Translates between search coordinates and real parameter values.
///
/// A search algorithm manipulates a *coordinate*. The evaluated program sees a
/// *real* parameter value. The two are equal unless log-space search is
/// active, in which case the coordinate is the natural logarithm of the real
/// value. When integer mode is active, real values are rounded to the nearest
/// integer before they are used, so the cache and the process invocation
/// always agree on the value actually tested.
///
/// Every method is pure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainMapper {
    log_space: bool,
    integer: bool,
}

impl DomainMapper {
    /// Creates a mapper with the given log-space and integer policies.
    #[must_use]
    pub fn new(log_space: bool, integer: bool) -> Self {
        Self { log_space, integer }
    }

    /// Returns true if the search runs over `ln(param)`.
    #[must_use]
    pub fn is_log_space(&self) -> bool {
        self.log_space
    }

    /// Returns true if parameter values are snapped to integers.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Maps a coordinate to real space: `exp(c)` in log-space, else identity.
    #[must_use]
    pub fn to_real(&self, coordinate: f64) -> f64 {
        if self.log_space {
            coordinate.exp()
        } else {
            coordinate
        }
    }

    /// Maps a real value to a coordinate: `ln(v)` in log-space, else identity.
    #[must_use]
    pub fn to_coordinate(&self, real: f64) -> f64 {
        if self.log_space { real.ln() } else { real }
    }

    /// Rounds to the nearest integer (halves away from zero) in integer mode.
    #[must_use]
    pub fn round_if_integer(&self, real: f64) -> f64 {
        if self.integer { real.round() } else { real }
    }

    /// Converts a coordinate into the value passed to the evaluated program.
    ///
    /// In log-space integer mode the result is at least `1`, since `0` has no
    /// coordinate.
    #[must_use]
    pub fn to_argument(&self, coordinate: f64) -> f64 {
        let value = self.round_if_integer(self.to_real(coordinate));
        if self.log_space && self.integer {
            value.max(1.0)
        } else {
            value
        }
    }

    /// Applies the integer policy in coordinate space.
    ///
    /// Returns the coordinate of [`to_argument`](Self::to_argument), so a
    /// snapped coordinate always evaluates the value it names. Identity when
    /// integer mode is off.
    #[must_use]
    pub fn snap(&self, coordinate: f64) -> f64 {
        if self.integer {
            self.to_coordinate(self.to_argument(coordinate))
        } else {
            coordinate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn identity_by_default() {
        let mapper = DomainMapper::default();

        assert_eq!(mapper.to_real(0.37), 0.37);
        assert_eq!(mapper.to_argument(-2.5), -2.5);
        assert_eq!(mapper.snap(4.4), 4.4);
    }

    #[test]
    fn log_space_round_trips() {
        let mapper = DomainMapper::new(true, false);

        for v in [1e-9, 1e-6, 0.5, 1.0, 3.7, 1e4] {
            assert_relative_eq!(mapper.to_real(mapper.to_coordinate(v)), v, max_relative = 1e-12);
        }
    }

    #[test]
    fn integer_rounding_is_idempotent() {
        let mapper = DomainMapper::new(false, true);

        for v in [-3.5, -0.4, 0.49, 0.5, 2.5, 6.999, 10.0] {
            let once = mapper.round_if_integer(v);
            assert_eq!(mapper.round_if_integer(once), once);
            assert_eq!(once.fract(), 0.0);
        }
        assert_eq!(mapper.round_if_integer(2.5), 3.0);
        assert_eq!(mapper.round_if_integer(6.49), 6.0);
    }

    #[test]
    fn snap_agrees_with_argument() {
        let mapper = DomainMapper::new(true, true);

        let c = 7.3_f64.ln();
        let snapped = mapper.snap(c);

        assert_relative_eq!(mapper.to_real(snapped), 7.0, max_relative = 1e-12);
        assert_eq!(mapper.to_argument(snapped), 7.0);
    }

    #[test]
    fn log_integer_argument_never_below_one() {
        let mapper = DomainMapper::new(true, true);

        assert_eq!(mapper.to_argument(0.2_f64.ln()), 1.0);
        assert!(mapper.snap(0.2_f64.ln()).is_finite());
    }
}
