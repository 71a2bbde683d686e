/// Errors that can occur during a Brent search.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("objective failed")]
    Objective(#[source] E),

    #[error(
        "no convergence after {iters} iterations: bracket [{a}, {b}], losses [{fa}, {fb}]"
    )]
    IterationLimitExceeded {
        iters: usize,
        a: f64,
        b: f64,
        fa: f64,
        fb: f64,
    },
}
