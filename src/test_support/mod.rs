//! Test utilities and mocks for unit tests.
//!
//! Provides a canned [`QueryExecutor`] so discovery and provider logic can be
//! exercised without a Bazel installation.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazel_provider::test_support::{MockQueryExecutor, MockQueryOutput};
//!
//! let exec = MockQueryExecutor::new();
//! exec.expect("bazel query :all", MockQueryOutput::stdout("//a:a\n"));
//! ```

pub mod fixtures;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::discovery::{DiscoveryError, QueryExecutor, QueryRequest};

pub use fixtures::*;

/// What a mocked query does when it runs.
#[derive(Debug, Clone)]
pub enum MockQueryOutput {
    /// Exit 0 with this standard output
    Stdout(String),
    /// Exit with a non-zero status and this standard error
    Exit { code: i32, stderr: String },
    /// Fail to start, as if the executable were missing
    SpawnError(String),
    /// Print bytes that are not UTF-8
    InvalidUtf8,
    /// Never finish within the configured timeout
    Timeout,
}

impl MockQueryOutput {
    /// Successful output.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        MockQueryOutput::Stdout(stdout.into())
    }

    /// Non-zero exit.
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        MockQueryOutput::Exit {
            code,
            stderr: stderr.into(),
        }
    }

    /// Spawn failure.
    pub fn spawn_error(message: impl Into<String>) -> Self {
        MockQueryOutput::SpawnError(message.into())
    }

    fn into_result(self, command: String, request: &QueryRequest) -> Result<String, DiscoveryError> {
        match self {
            MockQueryOutput::Stdout(stdout) => Ok(stdout),
            MockQueryOutput::Exit { code, stderr } => Err(DiscoveryError::Exit {
                command,
                code: Some(code),
                stderr,
            }),
            MockQueryOutput::SpawnError(message) => Err(DiscoveryError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            }),
            MockQueryOutput::InvalidUtf8 => {
                let source = match String::from_utf8(vec![0xff, 0xfe]) {
                    Err(e) => e,
                    Ok(_) => unreachable!("0xff is never valid UTF-8"),
                };
                Err(DiscoveryError::Decode { command, source })
            }
            MockQueryOutput::Timeout => Err(DiscoveryError::Timeout {
                command,
                secs: request.timeout.map(|t| t.as_secs()).unwrap_or(0),
            }),
        }
    }
}

/// Mock query executor.
///
/// Matches the full command line (`<executable> query <filter>`) against
/// registered expectations and records every call.
#[derive(Debug, Default)]
pub struct MockQueryExecutor {
    expectations: Mutex<Vec<(String, MockQueryOutput)>>,
    default_output: Mutex<Option<MockQueryOutput>>,
    calls: Mutex<Vec<String>>,
}

impl MockQueryExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockQueryExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockQueryOutput) -> &Self {
        self.expectations
            .lock()
            .unwrap()
            .push((cmd.to_string(), output));
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockQueryOutput) -> &Self {
        *self.default_output.lock().unwrap() = Some(output);
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, cmd: &str) -> Option<MockQueryOutput> {
        let expectations = self.expectations.lock().unwrap();
        expectations
            .iter()
            .find(|(pattern, _)| pattern == cmd)
            .map(|(_, output)| output.clone())
            .or_else(|| self.default_output.lock().unwrap().clone())
    }
}

#[async_trait]
impl QueryExecutor for MockQueryExecutor {
    async fn query(&self, request: &QueryRequest) -> Result<String, DiscoveryError> {
        let command = request.display_command();
        self.calls.lock().unwrap().push(command.clone());

        match self.lookup(&command) {
            Some(output) => output.into_result(command, request),
            None => Err(DiscoveryError::Spawn {
                command: command.clone(),
                source: std::io::Error::other(format!("unexpected command: {}", command)),
            }),
        }
    }
}
