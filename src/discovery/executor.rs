//! Running the target query.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::error::DiscoveryError;
use crate::util::config::ProviderConfig;
use crate::util::process::{ProcessBuilder, ProcessFailure};

/// One `<executable> query <filter>` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Working directory for the query
    pub root: PathBuf,
    /// Bazel binary
    pub executable: String,
    /// Query expression
    pub target_filter: String,
    /// Optional limit on how long to wait
    pub timeout: Option<Duration>,
}

impl QueryRequest {
    /// Build the request for a root from the current configuration.
    pub fn new(root: &Path, config: &ProviderConfig) -> Self {
        QueryRequest {
            root: root.to_path_buf(),
            executable: config.executable.clone(),
            target_filter: config.target_filter.clone(),
            timeout: config.query_timeout.map(Duration::from_secs),
        }
    }

    /// Arguments after the executable.
    pub fn args(&self) -> [&str; 2] {
        ["query", self.target_filter.as_str()]
    }

    /// The command line, for messages.
    pub fn display_command(&self) -> String {
        format!("{} query {}", self.executable, self.target_filter)
    }
}

/// Runs a query and returns its standard output.
///
/// The seam between discovery logic and the operating system; tests swap in
/// a canned implementation.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<String, DiscoveryError>;
}

/// Runs the query as a real subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessQueryExecutor;

#[async_trait]
impl QueryExecutor for ProcessQueryExecutor {
    async fn query(&self, request: &QueryRequest) -> Result<String, DiscoveryError> {
        let command = request.display_command();

        let output = ProcessBuilder::new(&request.executable)
            .args(request.args())
            .cwd(&request.root)
            .timeout(request.timeout)
            .exec()
            .await
            .map_err(|failure| match failure {
                ProcessFailure::Io(source) => DiscoveryError::Spawn {
                    command: command.clone(),
                    source,
                },
                ProcessFailure::TimedOut(limit) => DiscoveryError::Timeout {
                    command: command.clone(),
                    secs: limit.as_secs(),
                },
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::Exit {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|source| DiscoveryError::Decode { command, source })
    }
}
