//! Target discovery via `bazel query`.
//!
//! Discovery never fails from the caller's point of view. A query that runs
//! and prints nothing useful is a success with zero targets; a query that
//! cannot run, exits non-zero, prints invalid UTF-8 or times out yields an
//! empty list plus a [`DiscoveryWarning`].

mod error;
mod executor;

use tracing::debug;

use crate::core::Target;

pub use error::{DiscoveryError, DiscoveryWarning};
pub use executor::{ProcessQueryExecutor, QueryExecutor, QueryRequest};

/// Query output line meaning "nothing matched".
pub const EMPTY_RESULTS_SENTINEL: &str = "INFO: Empty results";

/// Result of one discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The query ran; these are its targets in output order (possibly none)
    Success(Vec<Target>),

    /// The query failed; the list is what could be salvaged (always empty today)
    Degraded {
        targets: Vec<Target>,
        warning: DiscoveryWarning,
    },
}

impl Discovery {
    /// Discovered targets, regardless of outcome.
    pub fn targets(&self) -> &[Target] {
        match self {
            Discovery::Success(targets) | Discovery::Degraded { targets, .. } => targets,
        }
    }

    /// The failure advisory, if discovery degraded.
    pub fn warning(&self) -> Option<&DiscoveryWarning> {
        match self {
            Discovery::Success(_) => None,
            Discovery::Degraded { warning, .. } => Some(warning),
        }
    }

    /// Whether the query ran successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Discovery::Success(_))
    }

    /// Split into the target list and the optional advisory.
    pub fn into_parts(self) -> (Vec<Target>, Option<DiscoveryWarning>) {
        match self {
            Discovery::Success(targets) => (targets, None),
            Discovery::Degraded { targets, warning } => (targets, Some(warning)),
        }
    }
}

/// Run the query described by `request` and reduce its output to targets.
pub async fn discover(executor: &dyn QueryExecutor, request: &QueryRequest) -> Discovery {
    match executor.query(request).await {
        Ok(stdout) => {
            let targets = parse_query_output(&stdout);
            debug!(
                "`{}` reported {} target(s)",
                request.display_command(),
                targets.len()
            );
            Discovery::Success(targets)
        }
        Err(e) => {
            debug!("target discovery degraded: {}", e);
            Discovery::Degraded {
                targets: Vec::new(),
                warning: DiscoveryWarning::from(e),
            }
        }
    }
}

/// Reduce query output to target labels.
///
/// Lines are split on any CR/LF combination. Empty lines and lines carrying
/// the "no results" sentinel are dropped; everything else is kept verbatim,
/// duplicates included.
pub fn parse_query_output(stdout: &str) -> Vec<Target> {
    stdout
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|line| !line.contains(EMPTY_RESULTS_SENTINEL))
        .filter_map(Target::new)
        .collect()
}
