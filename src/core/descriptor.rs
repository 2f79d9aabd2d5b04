//! Build descriptors handed to the build orchestrator.
//!
//! A descriptor is a self-contained invocation: what to run, where, with which
//! arguments, and which grammars turn its output into diagnostics. The JSON
//! form is the stable output schema:
//!
//! ```json
//! {
//!   "name": "Bazel: //app:server",
//!   "executable": "bazel",
//!   "arguments": ["build", "//app:server"],
//!   "cwd": "/work/project",
//!   "shellInvocation": false,
//!   "errorPatterns": ["..."],
//!   "warningPatterns": ["..."]
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostics::DiagnosticPattern;

/// Label prefix shared by every descriptor name.
pub const NAME_PREFIX: &str = "Bazel";

/// Name of the descriptor that builds without an explicit target.
pub const DEFAULT_DESCRIPTOR_NAME: &str = "Bazel: default (no target)";

/// One invocable build.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    /// Human-readable label
    pub name: String,

    /// Program to run
    pub executable: String,

    /// Arguments passed after the executable
    pub arguments: Vec<String>,

    /// Working directory for the build
    pub cwd: PathBuf,

    /// Whether the invocation needs a shell (always false: direct argv)
    pub shell_invocation: bool,

    /// Error grammars, in match order
    pub error_patterns: Vec<DiagnosticPattern>,

    /// Warning grammars, in match order
    pub warning_patterns: Vec<DiagnosticPattern>,
}

impl BuildDescriptor {
    /// Whether this is the no-target default.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_DESCRIPTOR_NAME
    }

    /// The command line, for display only.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.executable.clone()];
        parts.extend(self.arguments.iter().cloned());
        parts.join(" ")
    }
}

/// Descriptor label for a discovered target.
pub fn target_descriptor_name(target: &str) -> String {
    format!("{}: {}", NAME_PREFIX, target)
}
