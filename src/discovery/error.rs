//! Target discovery failures.
//!
//! These never escape [`discover`](super::discover): they are folded into a
//! [`DiscoveryWarning`] and the caller still gets a usable result.

use std::fmt;
use std::string::FromUtf8Error;

use miette::Diagnostic;
use thiserror::Error;

/// Why `bazel query` produced no target list.
#[derive(Debug, Error, Diagnostic)]
pub enum DiscoveryError {
    /// The query process could not be started
    #[error("failed to spawn `{command}`: {source}")]
    #[diagnostic(
        code(bazel_provider::discovery::spawn),
        help("Check that the configured executable is installed and on PATH")
    )]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The query process exited unsuccessfully
    #[error("`{command}` failed with {}{}", exit_description(.code), stderr_suffix(.stderr))]
    #[diagnostic(
        code(bazel_provider::discovery::exit),
        help("Run the query by hand in the project root to see the full output")
    )]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The query printed something other than UTF-8
    #[error("`{command}` printed invalid UTF-8: {source}")]
    #[diagnostic(code(bazel_provider::discovery::decode))]
    Decode {
        command: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The query did not finish in time
    #[error("`{command}` did not finish within {secs}s")]
    #[diagnostic(
        code(bazel_provider::discovery::timeout),
        help("Raise `query-timeout` or remove it to wait indefinitely")
    )]
    Timeout { command: String, secs: u64 },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

impl DiscoveryError {
    /// The command line that failed.
    pub fn command(&self) -> &str {
        match self {
            DiscoveryError::Spawn { command, .. }
            | DiscoveryError::Exit { command, .. }
            | DiscoveryError::Decode { command, .. }
            | DiscoveryError::Timeout { command, .. } => command,
        }
    }
}

/// Advisory produced when discovery degraded.
///
/// Carries only the textual description; route it to whatever error
/// reporting the caller has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryWarning {
    command: String,
    message: String,
}

impl DiscoveryWarning {
    /// Create a warning from a description.
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        DiscoveryWarning {
            command: command.into(),
            message: message.into(),
        }
    }

    /// The query command line that failed.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DiscoveryError> for DiscoveryWarning {
    fn from(error: DiscoveryError) -> Self {
        DiscoveryWarning::new(error.command(), error.to_string())
    }
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
