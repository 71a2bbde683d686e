/// Actions an observer can take during a Brent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the better of the newest candidate and the current `b`.
    StopEarly,
}
