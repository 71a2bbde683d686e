/// Events emitted by the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A candidate was evaluated.
    Step {
        /// Iteration counter, starting at 1.
        iter: usize,

        /// The bracket `[a, b]` before this step was applied.
        bracket: [f64; 2],

        /// The evaluated candidate.
        x: f64,

        /// The loss at `x`.
        loss: f64,

        /// True if the interpolated candidate was rejected in favor of bisection.
        bisected: bool,
    },
}
