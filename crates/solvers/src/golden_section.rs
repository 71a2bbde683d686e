//! Golden section search for single-variable minimization.
//!
//! # Algorithm
//!
//! The search works on a [`Triple`] `(low, mid, high)` that brackets the
//! minimum. Each step places a probe `x` inside the larger of the two
//! sub-intervals, at a `2 - φ` fraction of its width away from `mid`, compares
//! `loss(x)` against `loss(mid)`, and recurses into the sub-bracket that must
//! still contain the minimum if the loss is unimodal.
//!
//! Recursion stops when the bracket width falls below `tolerance` relative to
//! the magnitude of the current points, and the bracket midpoint is returned.
//!
//! # Ties
//!
//! If `loss(x) == loss(mid)` exactly, unimodality cannot tell which side holds
//! the minimum. The search logs a warning and returns the midpoint of `x` and
//! `mid` with [`Status::Tie`]. This is not an error.
//!
//! # Observer Events
//!
//! The solver emits [`Event::Probed`] once per step after both losses are
//! known, and [`Event::Tie`] when a tie ends the search. Observers can return
//! [`Action::StopEarly`] from a probe event to halt with the better of the
//! two probed points.

mod action;
mod config;
mod error;
mod event;
mod search;
mod solution;
mod triple;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use triple::{RES_PHI, Triple};

use hypersearch_core::{Objective, Observer};

use search::Search;

/// Finds the minimum of the objective between the two bounds.
///
/// The initial `mid` is placed at `lower + RES_PHI * (upper - lower)`.
/// Every coordinate is passed through `snap` before it is evaluated or
/// returned.
///
/// # Errors
///
/// Returns [`Error::Objective`] as soon as the objective fails. Failures are
/// never retried.
pub fn minimize<O, S, Obs>(
    objective: &mut O,
    bounds: [f64; 2],
    config: &Config,
    snap: S,
    observer: Obs,
) -> Result<Solution, Error<O::Error>>
where
    O: Objective,
    S: Fn(f64) -> f64,
    Obs: Observer<Event, Action>,
{
    let triple = Triple::from_bounds(bounds);
    Search::new(objective, config, snap, observer).descend(triple, 0)
}

/// Finds the minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns [`Error::Objective`] if the objective fails.
pub fn minimize_unobserved<O, S>(
    objective: &mut O,
    bounds: [f64; 2],
    config: &Config,
    snap: S,
) -> Result<Solution, Error<O::Error>>
where
    O: Objective,
    S: Fn(f64) -> f64,
{
    minimize(objective, bounds, config, snap, ())
}
