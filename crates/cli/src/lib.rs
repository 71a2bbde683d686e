//! Search driver and command-line front end for hypersearch.
//!
//! [`SearchDriver`] runs a line search from `hypersearch-solvers` against an
//! [`Evaluator`](hypersearch_exec::Evaluator) and reconciles the algorithm's
//! answer with the best point the evaluator has seen. [`Cli`] turns command
//! line arguments into the pieces the driver needs.

pub mod bounds;
pub mod cli;
pub mod driver;
pub mod options;

pub use bounds::{BoundsError, SearchBounds};
pub use cli::Cli;
pub use driver::{Method, SearchDriver, SearchError, SearchOutcome};
pub use options::expects_integer;
