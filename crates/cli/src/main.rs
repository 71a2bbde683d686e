use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use hypersearch::{Cli, SearchDriver, SearchError, SearchOutcome};
use hypersearch_exec::{Evaluator, ProcessRunner, format_value};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => {
            println!("{}\t{}", format_value(outcome.param), outcome.loss);
            ExitCode::SUCCESS
        }
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<SearchOutcome> {
    let template = cli.template().context("invalid learner command")?;
    let bounds = cli.bounds().context("invalid search bounds")?;
    let mapper = cli.mapper(&template);
    info!(
        command = template.as_str(),
        lower = bounds.lower(),
        upper = bounds.upper(),
        log_space = mapper.is_log_space(),
        integer = mapper.is_integer(),
        "starting search"
    );

    let runner = ProcessRunner::new(cli.runner_config());
    let mut evaluator = Evaluator::new(runner, template, mapper, io::stderr());
    if let Some(command) = &cli.evaluator {
        evaluator = evaluator.with_external_evaluator(command.clone());
    }
    if let Some(path) = &cli.model_artifact {
        evaluator = evaluator.with_artifact(path.clone());
    }

    let outcome = SearchDriver::new(bounds, cli.method())
        .run(&mut evaluator)
        .context("search aborted")?;
    info!(evaluations = evaluator.invocations(), "search finished");

    Ok(outcome)
}

/// Prints the error chain and, for failed evaluations, what to rerun by hand.
fn report(error: &anyhow::Error) {
    eprintln!();
    eprintln!("hypersearch: {error:#}");

    let Some(failure) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SearchError>())
        .and_then(SearchError::evaluation)
    else {
        return;
    };

    if let Some(command) = failure.command() {
        eprintln!("command: {command}");
    }
    if !failure.output().is_empty() {
        eprintln!("output:");
        for line in failure.output() {
            eprintln!("  {line}");
        }
    }
    eprintln!("run the command by hand to reproduce the failure");
}
