//! Runs the `hypersearch` binary against real shell commands.

#![cfg(unix)]

use std::process::{Command, Output};

fn hypersearch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hypersearch"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn parse_result(output: &Output) -> (f64, f64) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (param, loss) = stdout
        .trim_end()
        .split_once('\t')
        .expect("result should be tab separated");
    (param.parse().expect("param"), loss.parse().expect("loss"))
}

const QUADRATIC: &str = r#"awk 'BEGIN { x = %; print "average loss = " (x - 0.3) ^ 2 }'"#;

#[test]
fn finds_minimum_of_real_command() {
    let output = hypersearch(&["--tolerance", "0.01", "0", "1", QUADRATIC]);

    assert!(output.status.success(), "{output:?}");
    let (param, loss) = parse_result(&output);
    assert!((param - 0.3).abs() < 0.01, "param {param}");
    assert!(loss < 1e-4, "loss {loss}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().any(|line| line.starts_with("trying ")));
    assert!(stderr.contains("(best)"));
}

#[test]
fn integer_flag_prints_whole_number() {
    let command = r#"awk 'BEGIN { x = %; print "average loss = " (x - 7) ^ 2 }'"#;
    let output = hypersearch(&["-i", "1", "10", command]);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7\t0\n");
}

#[test]
fn log_space_search() {
    let command = r#"awk 'BEGIN { x = %; print "average loss = " (log(x) + 10) ^ 2 }'"#;
    let output = hypersearch(&["-L", "--tolerance", "0.001", "1e-6", "0.1", command]);

    assert!(output.status.success(), "{output:?}");
    let (param, _) = parse_result(&output);
    assert!((param.ln() + 10.0).abs() < 0.1, "param {param}");
}

#[test]
fn failing_command_exits_with_diagnostics() {
    let output = hypersearch(&["0", "1", "echo broken %; exit 3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exited with status 3"), "{stderr}");
    assert!(stderr.contains("command: echo broken"), "{stderr}");
    assert!(stderr.contains("  broken"), "{stderr}");
    assert!(stderr.contains("run the command by hand"), "{stderr}");
}

#[test]
fn missing_loss_exits_with_diagnostics() {
    let output = hypersearch(&["0", "1", "echo nothing to see for %"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no loss found"), "{stderr}");
    assert!(stderr.contains("  nothing to see for "), "{stderr}");
}

#[test]
fn external_evaluator_supplies_the_loss() {
    let output = hypersearch(&[
        "--tolerance",
        "0.01",
        "-e",
        "awk 'BEGIN { print (% - 0.6) ^ 2 }'",
        "0",
        "1",
        "true %",
    ]);

    assert!(output.status.success(), "{output:?}");
    let (param, _) = parse_result(&output);
    assert!((param - 0.6).abs() < 0.01, "param {param}");
}

#[test]
fn command_without_placeholder_is_rejected() {
    let output = hypersearch(&["0", "1", "echo", "average loss = 1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid learner command"));
}
