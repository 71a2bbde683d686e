//! Brent's method: interpolation search with a bisection fallback.
//!
//! # Algorithm
//!
//! This is the classical root-bracketing form of Brent's method applied to
//! the loss directly. Each iteration proposes a candidate by inverse
//! quadratic interpolation when three distinct losses are available, or by
//! the secant rule otherwise. The candidate is accepted only if it lies
//! between `(3a + b) / 4` and `b` and shrinks fast enough relative to the
//! previous steps; otherwise the bracket is bisected.
//!
//! # Legacy Behavior
//!
//! Before iterating, the bracket is validated with the root-finding test
//! `f(a) * f(b) >= 0`. Losses are usually non-negative, so for most loss
//! functions this test fails immediately and the endpoint with the lower loss
//! is returned with [`Status::NoSignChange`]. This method is kept as an
//! explicit opt-in for compatibility; prefer [`golden_section`] for real
//! searches.
//!
//! # Limits
//!
//! Exceeding [`Config::max_iters`] is fatal and reported as
//! [`Error::IterationLimitExceeded`] with the current bracket.
//!
//! [`golden_section`]: crate::golden_section

mod action;
mod config;
mod error;
mod event;
mod interpolate;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use hypersearch_core::{Objective, Observer};
use tracing::{debug, warn};

use interpolate::{Step, needs_bisection, propose};

/// Runs Brent's method between the two bounds.
///
/// Every candidate coordinate is passed through `snap` before it is
/// evaluated. If snapping lands a candidate on a current bracket endpoint,
/// the bracket cannot shrink further and the search ends with
/// [`Status::Stalled`].
///
/// # Errors
///
/// Returns [`Error::Objective`] if the objective fails, or
/// [`Error::IterationLimitExceeded`] if the iteration cap is exceeded.
#[allow(clippy::many_single_char_names)]
pub fn minimize<O, S, Obs>(
    objective: &mut O,
    bounds: [f64; 2],
    config: &Config,
    snap: S,
    mut observer: Obs,
) -> Result<Solution, Error<O::Error>>
where
    O: Objective,
    S: Fn(f64) -> f64,
    Obs: Observer<Event, Action>,
{
    let tol = config.tolerance();

    let mut a = snap(bounds[0]);
    let mut b = snap(bounds[1]);
    let mut fa = objective.loss(a).map_err(Error::Objective)?;
    let mut fb = objective.loss(b).map_err(Error::Objective)?;

    if fa * fb >= 0.0 {
        warn!(
            a,
            b,
            fa,
            fb,
            "losses at both bounds share a sign; returning the better bound"
        );
        let (x, loss) = if fa <= fb { (a, fa) } else { (b, fb) };
        return Ok(Solution::new(Status::NoSignChange, x, loss, 0));
    }

    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = c;
    let mut bisected = true;
    let mut iters = 0;

    while fb != 0.0 && (b - a).abs() > tol {
        if iters == config.max_iters() {
            return Err(Error::IterationLimitExceeded { iters, a, b, fa, fb });
        }
        iters += 1;

        let step = Step { a, b, c, d, fa, fb, fc };
        let mut s = propose(&step);
        if needs_bisection(&step, s, bisected, tol) {
            s = 0.5 * (a + b);
            bisected = true;
        } else {
            bisected = false;
        }

        let s = snap(s);
        #[allow(clippy::float_cmp)]
        let collapsed = s == a || s == b;
        if collapsed {
            debug!(s, a, b, "candidate snapped onto the bracket; stopping");
            return Ok(Solution::new(Status::Stalled, b, fb, iters));
        }

        let fs = objective.loss(s).map_err(Error::Objective)?;
        debug!(iters, a, b, s, fs, bisected, "brent step");

        let event = Event::Step {
            iter: iters,
            bracket: [a, b],
            x: s,
            loss: fs,
            bisected,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            let (x, loss) = if fs.abs() < fb.abs() { (s, fs) } else { (b, fb) };
            return Ok(Solution::new(Status::StoppedByObserver, x, loss, iters));
        }

        d = c;
        c = b;
        fc = fb;

        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Ok(Solution::new(Status::Converged, b, fb, iters))
}
