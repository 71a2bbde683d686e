/// Errors that can occur during golden section search.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("objective failed")]
    Objective(#[source] E),
}
