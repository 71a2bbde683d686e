//! The evaluation layer: turning a candidate parameter value into a loss.
//!
//! - [`CommandTemplate`]: the learner command with `%` placeholders
//! - [`ProcessRunner`]: runs a command under a shell, merging stderr into
//!   stdout and enforcing an optional timeout
//! - [`OutputParser`]: finds the loss in captured output, newest line first
//! - [`Evaluator`]: ties them together with a memo cache and best-result
//!   tracking held in a [`SearchContext`]
//!
//! The [`Runner`] trait is the seam between the evaluator and real
//! subprocesses, so searches can be exercised against simulated commands.

mod context;
mod evaluator;
mod parse;
mod process;
mod template;

pub use context::SearchContext;
pub use evaluator::{EvalError, Evaluator};
pub use parse::{LossPattern, OutputParser};
pub use process::{ProcessRunner, RunError, Runner, RunnerConfig};
pub use template::{CommandTemplate, PLACEHOLDER, TemplateError, format_value};
