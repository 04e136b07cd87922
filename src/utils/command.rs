//! External command execution with output capture and an optional timeout.

use std::fmt;
use std::process::Stdio;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::process::Command;

/// Error text reported when a command exceeds its timeout.
pub const TIMED_OUT: &str = "Command timed out";

/// Status reported for commands that never produced an exit code.
const FAILURE_STATUS: i32 = 1;

/// A program plus its arguments, passed to the OS without a shell in between.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured outcome of one command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub status: i32,
}

impl CommandResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self { stdout: String::new(), stderr: message.into(), status: FAILURE_STATUS }
    }

    pub fn timed_out() -> Self {
        Self::failure(TIMED_OUT)
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Seam between the probes and process execution.
#[allow(async_fn_in_trait)]
pub trait Runner {
    async fn run(&self, spec: &CommandSpec) -> CommandResult;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Runner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> CommandResult {
        run_command(spec, self.timeout).await
    }
}

/// Execute `spec`, capturing stdout, stderr and the exit status.
///
/// Never fails: launch errors, wait errors and timeouts all come back as a
/// result with empty stdout, an error message on stderr and a non-zero status.
/// A timed-out child is killed when its handle is dropped.
pub async fn run_command(spec: &CommandSpec, timeout: Option<Duration>) -> CommandResult {
    let started = Instant::now();
    let child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();
    let child = match child {
        Ok(child) => child,
        Err(e) => {
            warn!("failed to launch `{spec}`: {e}");
            return CommandResult::failure(format!("failed to launch {}: {e}", spec.program));
        }
    };

    // Dropping the wait future on timeout drops the child, which kills it
    let wait = child.wait_with_output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(output) => output,
            Err(_) => {
                warn!("`{spec}` timed out after {:.1}s", limit.as_secs_f64());
                return CommandResult::timed_out();
            }
        },
        None => wait.await,
    };

    match output {
        Ok(output) => {
            let result = CommandResult {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                status: output.status.code().unwrap_or(FAILURE_STATUS),
            };
            debug!(
                "`{spec}` exited with {} in {:?} ({} bytes stdout)",
                result.status,
                started.elapsed(),
                result.stdout.len()
            );
            result
        }
        Err(e) => {
            warn!("failed waiting for `{spec}`: {e}");
            CommandResult::failure(e.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Canned runner for probe tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::{CommandResult, CommandSpec, Runner};

    #[derive(Default)]
    pub struct ScriptedRunner {
        replies: HashMap<CommandSpec, CommandResult>,
        pub calls: RefCell<Vec<CommandSpec>>,
    }

    impl ScriptedRunner {
        pub fn reply(mut self, spec: CommandSpec, stdout: &str) -> Self {
            let result = CommandResult { stdout: stdout.to_string(), ..Default::default() };
            self.replies.insert(spec, result);
            self
        }

        pub fn fail(mut self, spec: CommandSpec, message: &str) -> Self {
            self.replies.insert(spec, CommandResult::failure(message));
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.program.clone()).collect()
        }
    }

    impl Runner for ScriptedRunner {
        async fn run(&self, spec: &CommandSpec) -> CommandResult {
            self.calls.borrow_mut().push(spec.clone());
            self.replies
                .get(spec)
                .cloned()
                .unwrap_or_else(|| CommandResult::failure(format!("unscripted: {spec}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display_joins_arguments() {
        let spec = CommandSpec::new("lv2info").arg("http://example.org/amp");
        assert_eq!(spec.to_string(), "lv2info http://example.org/amp");
    }

    #[test]
    fn timed_out_result_shape() {
        let r = CommandResult::timed_out();
        assert_eq!(r.stdout, "");
        assert_eq!(r.stderr, "Command timed out");
        assert_ne!(r.status, 0);
    }

    #[tokio::test]
    async fn missing_program_is_reported_not_raised() {
        let spec = CommandSpec::new("lv2probe-definitely-not-installed");
        let r = run_command(&spec, None).await;
        assert!(r.stdout.is_empty());
        assert!(r.stderr.contains("failed to launch"));
        assert_eq!(r.status, 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_status() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo hello; echo oops >&2; exit 3");
        let r = run_command(&spec, Some(Duration::from_secs(10))).await;
        assert_eq!(r.stdout, "hello\n");
        assert_eq!(r.stderr, "oops\n");
        assert_eq!(r.status, 3);
        assert!(!r.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let spec = CommandSpec::new("sleep").arg("5");
        let started = Instant::now();
        let r = run_command(&spec, Some(Duration::from_millis(200))).await;
        assert_eq!(r, CommandResult::timed_out());
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
