//! Subprocess execution utilities.
//!
//! Commands run by direct argv execution, never through a shell, and are
//! awaited on the tokio runtime so the caller's task suspends instead of
//! blocking its thread.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

/// Why a process did not produce output.
#[derive(Debug)]
pub enum ProcessFailure {
    /// The program could not be started or waited on
    Io(io::Error),
    /// The program did not finish within the timeout
    TimedOut(Duration),
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Kill the process if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Dropping the future on timeout must not leave the child running.
        cmd.kill_on_drop(true);

        cmd
    }

    /// Execute the command and wait for completion, capturing stdout and stderr.
    pub async fn exec(&self) -> Result<Output, ProcessFailure> {
        let mut cmd = self.build_command();

        tracing::debug!("running `{}`", self.display_command());

        let output = cmd.output();
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output).await {
                Ok(result) => result.map_err(ProcessFailure::Io),
                Err(_) => Err(ProcessFailure::TimedOut(limit)),
            },
            None => output.await.map_err(ProcessFailure::Io),
        }
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
