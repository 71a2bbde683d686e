//! Orchestration of a complete search run.

use std::io::Write;

use hypersearch_exec::{EvalError, Evaluator, Runner};
use hypersearch_solvers::{brent, golden_section};
use thiserror::Error;
use tracing::{debug, info};

use crate::bounds::{BoundsError, SearchBounds};

/// The line search algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    GoldenSection,

    /// Brent's method with its legacy bracket check.
    Brent,
}

/// The parameter value a search settled on and its loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Real-space parameter value, as passed to the learner.
    pub param: f64,

    /// The loss measured at `param`.
    pub loss: f64,
}

/// Errors that abort a search run.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error(transparent)]
    GoldenConfig(#[from] golden_section::ConfigError),

    #[error(transparent)]
    BrentConfig(#[from] brent::ConfigError),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    #[error("brent search failed to converge")]
    IterationLimit(#[source] brent::Error<EvalError>),
}

impl SearchError {
    /// Returns the evaluation failure behind this error, if any.
    #[must_use]
    pub fn evaluation(&self) -> Option<&EvalError> {
        match self {
            Self::Evaluation(error) => Some(error),
            _ => None,
        }
    }
}

impl From<golden_section::Error<EvalError>> for SearchError {
    fn from(error: golden_section::Error<EvalError>) -> Self {
        match error {
            golden_section::Error::Objective(error) => Self::Evaluation(error),
        }
    }
}

impl From<brent::Error<EvalError>> for SearchError {
    fn from(error: brent::Error<EvalError>) -> Self {
        match error {
            brent::Error::Objective(error) => Self::Evaluation(error),
            limit @ brent::Error::IterationLimitExceeded { .. } => Self::IterationLimit(limit),
        }
    }
}

/// Runs one search over an evaluator.
///
/// The driver maps the bounds into search coordinates, runs the chosen
/// algorithm, re-evaluates the coordinate it returns, and finally prefers the
/// best point the evaluator has seen if that point is strictly better or the
/// final loss is NaN. The
/// algorithms converge on bracket width rather than loss, so their terminal
/// point need not be the best one visited.
#[derive(Debug, Clone, Copy)]
pub struct SearchDriver {
    bounds: SearchBounds,
    method: Method,
}

impl SearchDriver {
    #[must_use]
    pub fn new(bounds: SearchBounds, method: Method) -> Self {
        Self { bounds, method }
    }

    #[must_use]
    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Runs the search to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] if the bounds are invalid for the evaluator's
    /// domain, any evaluation fails, or Brent's method exceeds its iteration
    /// cap. No partial result is returned.
    pub fn run<R: Runner, W: Write>(
        &self,
        evaluator: &mut Evaluator<R, W>,
    ) -> Result<SearchOutcome, SearchError> {
        let mapper = *evaluator.mapper();
        let coordinates = self.bounds.mapped(&mapper)?;
        let snap = |c: f64| mapper.snap(c);
        let tolerance = self.bounds.tolerance();

        let coordinate = match self.method {
            Method::GoldenSection => {
                let config = golden_section::Config::with_tolerance(tolerance)?;
                let observer = |event: &golden_section::Event| -> Option<golden_section::Action> {
                    debug!(?event, "golden section");
                    None
                };
                let solution =
                    golden_section::minimize(evaluator, coordinates, &config, snap, observer)?;
                info!(x = solution.x, status = ?solution.status, depth = solution.depth, "golden section finished");
                solution.x
            }
            Method::Brent => {
                let config = brent::Config::with_tolerance(tolerance)?;
                let observer = |event: &brent::Event| -> Option<brent::Action> {
                    debug!(?event, "brent");
                    None
                };
                let solution = brent::minimize(evaluator, coordinates, &config, snap, observer)?;
                info!(x = solution.x, status = ?solution.status, iters = solution.iters, "brent finished");
                solution.x
            }
        };

        let loss = evaluator.evaluate(coordinate)?;
        let param = mapper.to_argument(coordinate);

        match evaluator.context().best() {
            Some(best) if best.loss < loss || loss.is_nan() => {
                debug!(param, loss, best = best.x, best_loss = best.loss, "keeping best seen point");
                Ok(SearchOutcome {
                    param: best.x,
                    loss: best.loss,
                })
            }
            _ => Ok(SearchOutcome { param, loss }),
        }
    }
}
