/// How a Brent search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket shrank below tolerance or an exact zero was found.
    Converged,

    /// The losses at both bounds share a sign; the better bound was returned.
    NoSignChange,

    /// A snapped candidate landed on a bracket endpoint.
    Stalled,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Brent search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// The coordinate the search settled on.
    pub x: f64,

    /// The loss at `x`.
    pub loss: f64,

    /// Number of interpolation/bisection iterations performed.
    pub iters: usize,
}

impl Solution {
    pub(super) fn new(status: Status, x: f64, loss: f64, iters: usize) -> Self {
        Self {
            status,
            x,
            loss,
            iters,
        }
    }
}
