/// How the golden section search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket width dropped below the relative tolerance.
    Converged,

    /// The probe and middle point had identical losses.
    Tie,

    /// The recursion depth limit was reached before convergence.
    MaxDepth,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a golden section search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// The coordinate the search settled on (already snapped).
    pub x: f64,

    /// Recursion depth when the search finished.
    pub depth: usize,
}
