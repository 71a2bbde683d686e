//! Command-line arguments and their translation into search components.

use std::path::PathBuf;

use clap::Parser;
use hypersearch_core::DomainMapper;
use hypersearch_exec::{CommandTemplate, RunnerConfig, TemplateError};

use crate::{
    bounds::{BoundsError, SearchBounds},
    driver::Method,
    options::expects_integer,
};

/// Find the value of one learner hyperparameter that minimizes its loss.
///
/// The learner command is run once per candidate value with every `%`
/// replaced by that value, and the loss is read from an
/// `average loss = <number>` line in its output. The best value and its loss
/// are printed to stdout as `<value>\t<loss>`.
///
/// Examples:
///   hypersearch 1e-3 10 -L vw -l % train.dat
///   hypersearch 1 20 vw --passes % -c train.dat
#[derive(Parser, Debug)]
#[command(name = "hypersearch")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Lower bound of the search interval
    #[arg(allow_negative_numbers = true)]
    pub lower: f64,

    /// Upper bound of the search interval
    #[arg(allow_negative_numbers = true)]
    pub upper: f64,

    /// Learner command, with `%` where the parameter value goes
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,

    /// Relative convergence tolerance, strictly between 0 and 1
    #[arg(long, default_value_t = SearchBounds::DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Search the logarithm of the parameter
    ///
    /// Useful for parameters such as learning rates that span several orders
    /// of magnitude. Both bounds must be positive.
    #[arg(short = 'L', long)]
    pub log_space: bool,

    /// Only try integer values
    #[arg(short, long)]
    pub integer: bool,

    /// Do not infer integer mode from the option the placeholder belongs to
    #[arg(long)]
    pub no_integer_inference: bool,

    /// Use Brent's method instead of golden section search
    #[arg(short, long)]
    pub brent: bool,

    /// Command run after each learner run to compute the loss
    ///
    /// Its output is scanned for the last number printed. `%` placeholders
    /// are substituted as in the learner command.
    #[arg(short, long, value_name = "CMD")]
    pub evaluator: Option<String>,

    /// Per-run timeout in seconds (0 means no timeout)
    #[arg(short = 'T', long, value_name = "SECS", default_value_t = 0)]
    pub timeout: u64,

    /// Accept learner runs that exit with a nonzero status
    #[arg(long)]
    pub allow_nonzero_exit: bool,

    /// Scratch model file to delete after every run
    #[arg(long, value_name = "PATH")]
    pub model_artifact: Option<PathBuf>,
}

impl Cli {
    /// Returns the learner command template.
    ///
    /// # Errors
    ///
    /// Returns an error if the command has no `%` placeholder.
    pub fn template(&self) -> Result<CommandTemplate, TemplateError> {
        CommandTemplate::new(self.command.iter().cloned())
    }

    /// Returns the validated search bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not finite or the tolerance is out of range.
    pub fn bounds(&self) -> Result<SearchBounds, BoundsError> {
        SearchBounds::new(self.lower, self.upper, self.tolerance)
    }

    /// Returns the domain mapper for `template`.
    ///
    /// Integer mode is on when requested explicitly, or when the placeholder
    /// belongs to an option known to take integers and inference is enabled.
    #[must_use]
    pub fn mapper(&self, template: &CommandTemplate) -> DomainMapper {
        let inferred = !self.no_integer_inference
            && template.placeholder_option().is_some_and(expects_integer);
        DomainMapper::new(self.log_space, self.integer || inferred)
    }

    #[must_use]
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::default()
            .with_timeout_secs(self.timeout)
            .with_allow_nonzero_exit(self.allow_nonzero_exit)
    }

    #[must_use]
    pub fn method(&self) -> Method {
        if self.brent {
            Method::Brent
        } else {
            Method::GoldenSection
        }
    }
}
