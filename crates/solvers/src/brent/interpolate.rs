/// Bracket state used to propose the next Brent candidate.
///
/// `b` is the current best estimate, `a` the contrapoint, `c` the previous
/// `b`, and `d` the `b` before that.
#[derive(Debug, Clone, Copy)]
pub(super) struct Step {
    pub(super) a: f64,
    pub(super) b: f64,
    pub(super) c: f64,
    pub(super) d: f64,
    pub(super) fa: f64,
    pub(super) fb: f64,
    pub(super) fc: f64,
}

/// Proposes a candidate by inverse quadratic interpolation or the secant rule.
#[allow(clippy::float_cmp)]
pub(super) fn propose(step: &Step) -> f64 {
    let Step {
        a, b, c, fa, fb, fc, ..
    } = *step;

    if fa != fc && fb != fc {
        a * fb * fc / ((fa - fb) * (fa - fc))
            + b * fa * fc / ((fb - fa) * (fb - fc))
            + c * fa * fb / ((fc - fa) * (fc - fb))
    } else {
        b - fb * (b - a) / (fb - fa)
    }
}

/// Returns true if the proposed candidate must be replaced by bisection.
///
/// `bisected` tells whether the previous step was a bisection.
pub(super) fn needs_bisection(step: &Step, s: f64, bisected: bool, tol: f64) -> bool {
    let Step { a, b, c, d, .. } = *step;

    let bound = 0.25 * (3.0 * a + b);
    let (lo, hi) = if bound <= b { (bound, b) } else { (b, bound) };
    let outside = !(lo..=hi).contains(&s);

    let slow = if bisected {
        (s - b).abs() >= 0.5 * (b - c).abs()
    } else {
        (s - b).abs() >= 0.5 * (c - d).abs()
    };

    let tiny = if bisected {
        (b - c).abs() < tol
    } else {
        (c - d).abs() < tol
    };

    outside || slow || tiny
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn step(a: f64, b: f64, c: f64, f: impl Fn(f64) -> f64) -> Step {
        Step {
            a,
            b,
            c,
            d: c,
            fa: f(a),
            fb: f(b),
            fc: f(c),
        }
    }

    #[test]
    fn secant_when_c_matches_a() {
        let line = |x: f64| 2.0 * x - 1.0;
        let s = propose(&step(0.0, 1.0, 0.0, line));

        assert_relative_eq!(s, 0.5);
    }

    #[test]
    fn inverse_quadratic_is_exact_for_quadratic_inverse() {
        // x = y^2 + 1 has inverse-quadratic form, so interpolation hits the root at y = 0.
        let f = |x: f64| (x - 1.0).sqrt();
        let s = propose(&step(5.0, 2.0, 10.0, f));

        assert_relative_eq!(s, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_candidate_outside_window() {
        let st = step(0.0, 1.0, 0.0, |x| x - 0.9);

        // Window is [0.25, 1.0].
        assert!(needs_bisection(&st, 0.1, true, 1e-6));
        assert!(needs_bisection(&st, 1.5, true, 1e-6));
    }

    #[test]
    fn accepts_fast_candidate_inside_window() {
        let st = step(0.0, 1.0, 0.0, |x| x - 0.9);

        assert!(!needs_bisection(&st, 0.9, true, 1e-6));
    }

    #[test]
    fn rejects_when_previous_step_was_tiny() {
        let mut st = step(0.0, 1.0, 1.0 - 1e-9, |x| x - 0.9);
        st.d = st.c;

        assert!(needs_bisection(&st, 0.999_999_999_5, true, 1e-6));
    }
}
