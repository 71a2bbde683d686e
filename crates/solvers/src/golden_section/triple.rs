/// The golden ratio: φ = (1 + √5) / 2
const PHI: f64 = 1.618_033_988_749_895;

/// The golden ratio complement: 2 - φ ≈ 0.382.
///
/// Probing at this fraction of the larger sub-interval keeps every bracket
/// self-similar to the previous one.
pub const RES_PHI: f64 = 2.0 - PHI;

/// Which sub-interval of a [`Triple`] a probe was placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    /// Between `mid` and `high`.
    Upper,

    /// Between `low` and `mid`.
    Lower,
}

/// Three coordinates `(low, mid, high)` that bracket the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triple {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Triple {
    /// Creates a triple from explicit points.
    #[must_use]
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Creates the initial triple for a pair of bounds.
    ///
    /// Reversed bounds are swapped. `mid` sits at `low + RES_PHI * width`.
    #[must_use]
    pub fn from_bounds(bounds: [f64; 2]) -> Self {
        let [a, b] = bounds;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self::new(low, low + RES_PHI * (high - low), high)
    }

    /// Returns the outer bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.high - self.low).abs()
    }

    /// Returns the outer bracket midpoint.
    #[must_use]
    pub fn center(&self) -> f64 {
        0.5 * (self.high + self.low)
    }

    /// Returns the probe location for a given middle point and the side it lands on.
    ///
    /// The probe goes into the larger sub-interval. Equal sub-intervals probe
    /// the lower side.
    pub(super) fn probe(&self, mid: f64) -> (f64, Side) {
        let upper = self.high - mid;
        let lower = mid - self.low;
        if upper > lower {
            (mid + RES_PHI * upper, Side::Upper)
        } else {
            (mid - RES_PHI * lower, Side::Lower)
        }
    }

    /// Returns the sub-bracket that still holds the minimum.
    ///
    /// `x_is_better` is true when `loss(x) < loss(mid)`. The better point
    /// becomes the new middle and the worse point becomes an outer bound.
    pub(super) fn narrow(&self, mid: f64, x: f64, side: Side, x_is_better: bool) -> Self {
        match (side, x_is_better) {
            (Side::Upper, true) => Self::new(mid, x, self.high),
            (Side::Lower, true) => Self::new(self.low, x, mid),
            (Side::Upper, false) => Self::new(self.low, mid, x),
            (Side::Lower, false) => Self::new(x, mid, self.high),
        }
    }

    /// Returns true if the points are ordered `low <= mid <= high`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.low <= self.mid && self.mid <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn initial_mid_uses_golden_complement() {
        let triple = Triple::from_bounds([0.0, 1.0]);

        assert_relative_eq!(triple.mid, 0.381_966_011_250_105, epsilon = 1e-12);
        assert!(triple.is_ordered());
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let triple = Triple::from_bounds([10.0, 1.0]);

        assert_relative_eq!(triple.low, 1.0);
        assert_relative_eq!(triple.high, 10.0);
    }

    #[test]
    fn probe_lands_in_larger_interval() {
        let triple = Triple::from_bounds([0.0, 1.0]);

        let (x, side) = triple.probe(triple.mid);

        assert_eq!(side, Side::Upper);
        // The probe mirrors mid about the center.
        assert_relative_eq!(x, 1.0 - triple.mid, epsilon = 1e-12);

        let (x, side) = Triple::new(0.0, 0.7, 1.0).probe(0.7);
        assert_eq!(side, Side::Lower);
        assert!(x < 0.7 && x > 0.0);
    }

    #[test]
    fn narrow_keeps_points_ordered() {
        let triple = Triple::from_bounds([0.0, 1.0]);
        let (x, side) = triple.probe(triple.mid);

        for better in [true, false] {
            let next = triple.narrow(triple.mid, x, side, better);
            assert!(next.is_ordered(), "{next:?}");
            assert!(next.width() < triple.width());
        }

        let triple = Triple::new(0.0, 0.7, 1.0);
        let (x, side) = triple.probe(0.7);
        for better in [true, false] {
            assert!(triple.narrow(0.7, x, side, better).is_ordered());
        }
    }

    #[test]
    fn narrowing_shrinks_by_golden_ratio() {
        let triple = Triple::from_bounds([0.0, 1.0]);
        let (x, side) = triple.probe(triple.mid);

        let next = triple.narrow(triple.mid, x, side, false);

        assert_relative_eq!(next.width(), 1.0 / PHI, epsilon = 1e-12);
    }
}
