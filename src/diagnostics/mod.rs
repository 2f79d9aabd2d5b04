//! Compiler diagnostics recognized in build output.
//!
//! [`patterns`] holds the grammar table attached to every build descriptor;
//! [`matcher`] runs that table over captured output the same way an
//! orchestrator would.

pub mod matcher;
pub mod patterns;

use std::fmt;

use serde::Serialize;

pub use matcher::match_output;
pub use patterns::{DiagnosticPattern, PatternRegistry, Toolchain};

/// Severity class of a grammar and of what it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A structured diagnostic extracted from compiler or linker output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerDiagnostic {
    pub severity: Severity,
    pub toolchain: Toolchain,
    pub file: String,
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_end: Option<u64>,
    pub message: String,
}

impl fmt::Display for CompilerDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)?;
        if let Some(col) = self.col {
            write!(f, ":{}", col)?;
            if let Some(col_end) = self.col_end {
                write!(f, "-{}", col_end)?;
            }
        }
        write!(f, ": {}: {}", self.severity, self.message)
    }
}
