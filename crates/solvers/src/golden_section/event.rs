use hypersearch_core::Point;

use super::Triple;

/// Events emitted by the golden section solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Both the probe and the (snapped) middle point have been evaluated.
    Probed {
        /// Recursion depth of this step, starting at zero.
        depth: usize,

        /// The bracket being narrowed.
        triple: Triple,

        /// The new probe and its loss.
        x: Point,

        /// The middle point and its loss.
        mid: Point,
    },

    /// The probe and middle point have identical losses; the search ends.
    Tie {
        /// Recursion depth of this step.
        depth: usize,

        /// The probe coordinate.
        x: f64,

        /// The middle coordinate.
        mid: f64,

        /// The shared loss.
        loss: f64,
    },
}

impl Event {
    /// Returns the recursion depth at which this event was emitted.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Probed { depth, .. } | Self::Tie { depth, .. } => *depth,
        }
    }
}
