use std::{
    io::{self, BufRead, BufReader, Read, Write},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{RecvTimeoutError, Sender, unbounded};
use thiserror::Error;
use tracing::{debug, warn};

/// Runs a shell command and returns its combined output lines.
///
/// Implementations write incremental progress to `progress`. The evaluator
/// only depends on this trait, so searches can run against simulated
/// commands.
pub trait Runner {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if the command cannot be started, times out,
    /// dies from a signal, or exits with a nonzero status.
    fn run(&self, command: &str, progress: &mut dyn Write) -> Result<Vec<String>, RunError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, command: &str, progress: &mut dyn Write) -> Result<Vec<String>, RunError> {
        (**self).run(command, progress)
    }
}

/// Errors produced while running an external command.
///
/// Every variant carries the command and whatever output was captured, so
/// the operator can reproduce the failure by hand.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read output of `{command}`")]
    Io {
        command: String,
        output: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` timed out after {timeout:?}")]
    Timeout {
        command: String,
        timeout: Duration,
        output: Vec<String>,
    },

    #[error("`{command}` was killed by signal {signal}{}", core_note(.core_dumped))]
    SignalDeath {
        command: String,
        signal: i32,
        core_dumped: bool,
        output: Vec<String>,
    },

    #[error("`{command}` exited with status {code}")]
    NonZeroExit {
        command: String,
        code: i32,
        output: Vec<String>,
    },
}

fn core_note(core_dumped: &bool) -> &'static str {
    if *core_dumped { " (core dumped)" } else { "" }
}

impl RunError {
    /// Returns the command that failed.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. }
            | Self::Io { command, .. }
            | Self::Timeout { command, .. }
            | Self::SignalDeath { command, .. }
            | Self::NonZeroExit { command, .. } => command,
        }
    }

    /// Returns the output captured before the failure.
    #[must_use]
    pub fn output(&self) -> &[String] {
        match self {
            Self::Spawn { .. } => &[],
            Self::Io { output, .. }
            | Self::Timeout { output, .. }
            | Self::SignalDeath { output, .. }
            | Self::NonZeroExit { output, .. } => output,
        }
    }
}

/// Settings for [`ProcessRunner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Kill the command if it runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,

    /// Accept a nonzero exit status instead of failing.
    pub allow_nonzero_exit: bool,
}

impl RunnerConfig {
    /// Sets the timeout in whole seconds, where `0` means unbounded.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    /// Sets whether a nonzero exit status is accepted.
    #[must_use]
    pub fn with_allow_nonzero_exit(mut self, allow: bool) -> Self {
        self.allow_nonzero_exit = allow;
        self
    }
}

/// Runs commands through the system shell.
///
/// Standard error is merged into standard output for every stage of the
/// command line. Without a timeout, each output line that starts with a
/// digit is echoed to the progress writer as a single `.`; learners print
/// one such line per progress report, which gives the operator a heartbeat
/// without flooding the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    config: RunnerConfig,
}

impl ProcessRunner {
    /// Creates a runner with the given settings.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }
}

impl Runner for ProcessRunner {
    fn run(&self, command: &str, progress: &mut dyn Write) -> Result<Vec<String>, RunError> {
        debug!(command, timeout = ?self.config.timeout, "spawning command");

        let io_error = |output: Vec<String>| {
            move |source: io::Error| RunError::Io {
                command: command.to_owned(),
                output,
                source,
            }
        };

        // Both streams share one pipe, so their lines interleave in order.
        let (reader, writer) = io::pipe().map_err(io_error(Vec::new()))?;
        let stderr = writer.try_clone().map_err(io_error(Vec::new()))?;
        let mut child = {
            let mut cmd = shell(command);
            cmd.stdin(Stdio::null()).stdout(writer).stderr(stderr);
            cmd.spawn()
        }
        .map_err(|source| RunError::Spawn {
            command: command.to_owned(),
            source,
        })?;

        let (tx, rx) = unbounded();
        thread::spawn(move || forward_lines(reader, &tx));

        let deadline = self.config.timeout.map(|timeout| Instant::now() + timeout);
        let mut output = Vec::new();

        loop {
            let received = match deadline {
                Some(deadline) => rx.recv_deadline(deadline),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Ok(line)) => {
                    if deadline.is_none() && starts_with_digit(&line) {
                        let _ = progress.write_all(b".");
                        let _ = progress.flush();
                    }
                    output.push(line);
                }
                Ok(Err(source)) => {
                    kill(&mut child, command);
                    return Err(RunError::Io {
                        command: command.to_owned(),
                        output,
                        source,
                    });
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(self.timed_out(&mut child, command, output));
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let status = match deadline {
            Some(deadline) => match wait_until(&mut child, deadline) {
                Ok(Some(status)) => status,
                Ok(None) => return Err(self.timed_out(&mut child, command, output)),
                Err(source) => return Err(io_error(output)(source)),
            },
            None => child.wait().map_err(io_error(output.clone()))?,
        };

        check_status(status, command, output, self.config.allow_nonzero_exit)
    }
}

impl ProcessRunner {
    fn timed_out(&self, child: &mut Child, command: &str, output: Vec<String>) -> RunError {
        let timeout = self.config.timeout.unwrap_or_default();
        warn!(command, ?timeout, "command timed out; killing it");
        kill(child, command);
        RunError::Timeout {
            command: command.to_owned(),
            timeout,
            output,
        }
    }
}

/// Builds a shell invocation in its own process group.
#[cfg(unix)]
fn shell(command: &str) -> Command {
    use std::os::unix::process::CommandExt;

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).process_group(0);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Sends each line of `reader` until EOF, a read error, or the receiver hangs up.
fn forward_lines<R: Read>(reader: R, tx: &Sender<io::Result<String>>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send(Ok(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

fn starts_with_digit(line: &str) -> bool {
    line.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Polls the child until it exits or `deadline` passes.
fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(WAIT_POLL.min(deadline - now));
    }
}

const WAIT_POLL: Duration = Duration::from_millis(10);

/// Kills the child and everything it started, then reaps it.
fn kill(child: &mut Child, command: &str) {
    #[cfg(unix)]
    {
        use nix::{
            sys::signal::{Signal, killpg},
            unistd::Pid,
        };

        if let Ok(pid) = i32::try_from(child.id()) {
            if let Err(error) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
                debug!(command, %error, "killpg failed; process group probably gone");
            }
        }
    }

    if let Err(error) = child.kill() {
        debug!(command, %error, "kill failed; process probably exited");
    }
    let _ = child.wait();
}

fn check_status(
    status: ExitStatus,
    command: &str,
    output: Vec<String>,
    allow_nonzero_exit: bool,
) -> Result<Vec<String>, RunError> {
    if status.success() {
        return Ok(output);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return Err(RunError::SignalDeath {
                command: command.to_owned(),
                signal,
                core_dumped: status.core_dumped(),
                output,
            });
        }
    }

    let code = status.code().unwrap_or(-1);
    if allow_nonzero_exit {
        warn!(command, code, "command exited with nonzero status; continuing");
        return Ok(output);
    }

    Err(RunError::NonZeroExit {
        command: command.to_owned(),
        code,
        output,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn run(config: RunnerConfig, command: &str) -> (Result<Vec<String>, RunError>, String) {
        let mut progress = Vec::new();
        let result = ProcessRunner::new(config).run(command, &mut progress);
        (result, String::from_utf8(progress).unwrap())
    }

    #[test]
    fn captures_stdout_and_stderr() {
        let (result, _) = run(
            RunnerConfig::default(),
            "echo out; echo err 1>&2 | cat; echo 'average loss = 0.5' >&2",
        );

        let lines = result.expect("should succeed");
        assert_eq!(lines, vec!["out", "err", "average loss = 0.5"]);
    }

    #[test]
    fn digit_lines_print_progress_without_timeout() {
        let (result, progress) = run(RunnerConfig::default(), "echo 1; echo a; echo 22");

        assert_eq!(result.unwrap().len(), 3);
        assert_eq!(progress, "..");
    }

    #[test]
    fn no_progress_with_timeout() {
        let config = RunnerConfig::default().with_timeout_secs(30);
        let (result, progress) = run(config, "echo 1; echo 2");

        assert_eq!(result.unwrap(), vec!["1", "2"]);
        assert!(progress.is_empty());
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let (result, _) = run(RunnerConfig::default(), "echo partial; exit 3");

        match result {
            Err(RunError::NonZeroExit { code, output, .. }) => {
                assert_eq!(code, 3);
                assert_eq!(output, vec!["partial"]);
            }
            other => panic!("expected nonzero exit, got {other:?}"),
        }
    }

    #[test]
    fn nonzero_exit_can_be_allowed() {
        let config = RunnerConfig::default().with_allow_nonzero_exit(true);
        let (result, _) = run(config, "echo partial; exit 3");

        assert_eq!(result.unwrap(), vec!["partial"]);
    }

    #[test]
    fn timeout_keeps_partial_output() {
        let config = RunnerConfig::default().with_timeout_secs(1);
        let (result, _) = run(config, "echo started; exec sleep 30");

        match result {
            Err(RunError::Timeout { output, timeout, .. }) => {
                assert_eq!(timeout, Duration::from_secs(1));
                assert_eq!(output, vec!["started"]);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn signal_death_is_reported() {
        let (result, _) = run(RunnerConfig::default(), "kill -TERM $$");

        match result {
            Err(RunError::SignalDeath { signal, .. }) => assert_eq!(signal, 15),
            other => panic!("expected signal death, got {other:?}"),
        }
    }

    #[test]
    fn signal_death_of_learner_is_reported() {
        let (result, _) = run(RunnerConfig::default(), "sh -c 'kill -SEGV $$'");

        match result {
            Err(RunError::SignalDeath { signal, .. }) => assert_eq!(signal, 11),
            other => panic!("expected signal death, got {other:?}"),
        }
    }

    #[test]
    fn timeout_covers_commands_that_close_their_output() {
        let config = RunnerConfig::default().with_timeout_secs(1);
        let start = Instant::now();

        let (result, _) = run(config, "exec >/dev/null 2>&1; sleep 4");

        assert!(start.elapsed() < Duration::from_secs(3), "took {:?}", start.elapsed());
        match result {
            Err(RunError::Timeout { output, .. }) => assert!(output.is_empty()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn timeout_kills_background_children() {
        let config = RunnerConfig::default().with_timeout_secs(1);
        let (result, _) = run(config, "sleep 30 & echo $!; wait");

        let pid = match result {
            Err(RunError::Timeout { output, .. }) => output[0].clone(),
            other => panic!("expected timeout, got {other:?}"),
        };

        // A killed orphan may linger as a zombie until it is reaped.
        let gone = (0..200).any(|_| {
            let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).unwrap_or_default();
            let dead = stat
                .rsplit_once(") ")
                .is_none_or(|(_, rest)| rest.starts_with('Z'));
            if !dead {
                thread::sleep(Duration::from_millis(10));
            }
            dead
        });
        assert!(gone, "process {pid} survived the timeout");
    }

    #[test]
    fn timeout_zero_means_unbounded() {
        assert_eq!(RunnerConfig::default().with_timeout_secs(0).timeout, None);
    }
}
