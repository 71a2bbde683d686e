use std::convert::Infallible;

/// A scalar loss to be minimized over a single search coordinate.
///
/// Search algorithms only ever see this trait. The coordinate is whatever the
/// algorithm manipulates directly; translating it into the value handed to an
/// external program is the implementor's job (see [`DomainMapper`]).
///
/// Implementations take `&mut self` so they can memoize, track the best value
/// seen, or report progress.
///
/// [`DomainMapper`]: crate::DomainMapper
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the loss at coordinate `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the loss cannot be obtained. Search
    /// algorithms treat any error as fatal to the whole run.
    fn loss(&mut self, x: f64) -> Result<f64, Self::Error>;
}

/// An infallible [`Objective`] backed by a plain function.
///
/// Useful for synthetic loss functions in tests and examples.
///
/// ```
/// use hypersearch_core::{FnObjective, Objective};
///
/// let mut objective = FnObjective::new(|x: f64| (x - 0.3).powi(2));
/// assert_eq!(objective.loss(0.3), Ok(0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnObjective<F> {
    func: F,
}

impl<F> FnObjective<F>
where
    F: FnMut(f64) -> f64,
{
    /// Wraps `func` as an objective.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: FnMut(f64) -> f64,
{
    type Error = Infallible;

    fn loss(&mut self, x: f64) -> Result<f64, Self::Error> {
        Ok((self.func)(x))
    }
}

impl<T: Objective + ?Sized> Objective for &mut T {
    type Error = T::Error;

    fn loss(&mut self, x: f64) -> Result<f64, Self::Error> {
        (**self).loss(x)
    }
}
