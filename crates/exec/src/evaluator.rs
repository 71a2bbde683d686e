use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};

use hypersearch_core::{DomainMapper, Objective};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    context::SearchContext,
    parse::{LossPattern, OutputParser},
    process::{RunError, Runner},
    template::{CommandTemplate, format_value, substitute},
};

/// Errors that abort an evaluation, and with it the whole search.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("evaluating {param} failed")]
    Run {
        param: f64,
        #[source]
        source: RunError,
    },

    #[error("no loss found in the output of `{command}` for {param}")]
    LossNotFound {
        param: f64,
        command: String,
        output: Vec<String>,
    },

    #[error("failed to write progress")]
    Progress(#[from] io::Error),
}

impl EvalError {
    /// Returns the parameter value being evaluated, if known.
    #[must_use]
    pub fn param(&self) -> Option<f64> {
        match self {
            Self::Run { param, .. } | Self::LossNotFound { param, .. } => Some(*param),
            Self::Progress(_) => None,
        }
    }

    /// Returns the command whose run or output caused the failure.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Run { source, .. } => Some(source.command()),
            Self::LossNotFound { command, .. } => Some(command),
            Self::Progress(_) => None,
        }
    }

    /// Returns the output captured from the failing command.
    #[must_use]
    pub fn output(&self) -> &[String] {
        match self {
            Self::Run { source, .. } => source.output(),
            Self::LossNotFound { output, .. } => output,
            Self::Progress(_) => &[],
        }
    }
}

/// Turns search coordinates into losses by running the learner.
///
/// Each coordinate is mapped to its real, rounded argument by the
/// [`DomainMapper`]. Arguments already measured are answered from the
/// [`SearchContext`] without spawning anything or printing progress.
/// Otherwise the command is rendered and run, followed by the external
/// evaluator if one is configured, and the loss is parsed from the output of
/// whichever ran last.
///
/// Progress goes to `progress` as `trying <value> <loss>` lines, with
/// ` (best)` appended when the loss improves on everything seen so far.
#[derive(Debug)]
pub struct Evaluator<R, W> {
    runner: R,
    template: CommandTemplate,
    external: Option<String>,
    parser: OutputParser,
    mapper: DomainMapper,
    context: SearchContext,
    artifact: Option<PathBuf>,
    progress: W,
    invocations: usize,
}

impl<R: Runner, W: Write> Evaluator<R, W> {
    /// Creates an evaluator with an empty context.
    pub fn new(runner: R, template: CommandTemplate, mapper: DomainMapper, progress: W) -> Self {
        Self {
            runner,
            template,
            external: None,
            parser: OutputParser::default(),
            mapper,
            context: SearchContext::new(),
            artifact: None,
            progress,
            invocations: 0,
        }
    }

    /// Runs `command` after each learner run and parses the loss from its output.
    ///
    /// The evaluator output is scanned for any number rather than the
    /// `average loss` marker. Placeholders in `command` receive the same value
    /// as the learner command.
    #[must_use]
    pub fn with_external_evaluator(mut self, command: impl Into<String>) -> Self {
        self.external = Some(command.into());
        self.parser = OutputParser::new(LossPattern::AnyNumber);
        self
    }

    /// Registers a scratch model file to delete after every fresh evaluation.
    #[must_use]
    pub fn with_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact = Some(path.into());
        self
    }

    /// Returns the domain mapper.
    #[must_use]
    pub fn mapper(&self) -> &DomainMapper {
        &self.mapper
    }

    /// Returns the cache and best-result state.
    #[must_use]
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Returns how many fresh (uncached) evaluations have run.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Returns the progress writer.
    pub fn progress_mut(&mut self) -> &mut W {
        &mut self.progress
    }

    /// Returns the loss at a search coordinate.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] if a command fails, no loss can be parsed,
    /// or progress cannot be written.
    pub fn evaluate(&mut self, coordinate: f64) -> Result<f64, EvalError> {
        let param = self.mapper.to_argument(coordinate);
        self.evaluate_param(param)
    }

    /// Returns the loss for a real-space argument, bypassing the mapper.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_param(&mut self, param: f64) -> Result<f64, EvalError> {
        if let Some(loss) = self.context.lookup(param) {
            debug!(param, loss, "cache hit");
            return Ok(loss);
        }

        write!(self.progress, "trying {} ", format_value(param))?;
        self.progress.flush()?;

        let command = self.template.render(param);
        let mut output = self.run(param, &command)?;
        let mut source = command;

        if let Some(external) = &self.external {
            let external = substitute(external, param);
            output = self.run(param, &external)?;
            source = external;
        }

        let Some(loss) = self.parser.extract_loss(&output) else {
            return Err(EvalError::LossNotFound {
                param,
                command: source,
                output,
            });
        };

        self.invocations += 1;
        let is_best = self.context.record(param, loss);
        writeln!(
            self.progress,
            "{loss}{}",
            if is_best { " (best)" } else { "" }
        )?;

        if let Some(artifact) = &self.artifact {
            remove_artifact(artifact);
        }

        Ok(loss)
    }

    fn run(&mut self, param: f64, command: &str) -> Result<Vec<String>, EvalError> {
        self.runner
            .run(command, &mut self.progress)
            .map_err(|source| EvalError::Run { param, source })
    }
}

impl<R: Runner, W: Write> Objective for Evaluator<R, W> {
    type Error = EvalError;

    fn loss(&mut self, x: f64) -> Result<f64, Self::Error> {
        self.evaluate(x)
    }
}

fn remove_artifact(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed scratch model"),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => warn!(path = %path.display(), %error, "failed to remove scratch model"),
    }
}
