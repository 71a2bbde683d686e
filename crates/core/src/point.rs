/// A search coordinate with its evaluated loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// The coordinate (or real parameter value, depending on context).
    pub x: f64,

    /// The loss measured at `x`.
    pub loss: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, loss: f64) -> Self {
        Self { x, loss }
    }
}
