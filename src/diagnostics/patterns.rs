//! Diagnostic line grammars.
//!
//! The grammar source text is part of the output contract: orchestrators
//! receive it verbatim in every descriptor and compile it themselves, so the
//! strings below must stay byte-for-byte stable.

use std::fmt;
use std::sync::LazyLock;

use regex::{Match, Regex};
use serde::{Serialize, Serializer};

use super::{CompilerDiagnostic, Severity};

/// `<file>:<line>:<col>: (fatal error|error): <message>`
pub const GCC_ERROR: &str = r"(?<file>([A-Za-z]:[\/])?[^:\n]+):(?<line>\d+):(?<col>\d+):\s*(fatal error|error):\s*(?<message>.+)";

/// `"<file>", line <line>, characters <col>-<col_end>:` followed by `<message>` on the next line.
pub const OCAML_ERROR: &str = r#"(?<file>[\/0-9a-zA-Z\._\-]+)", line (?<line>\d+), characters (?<col>\d+)-(?<col_end>\d+):\n(?<message>.+)"#;

/// `<file>:<line>: <message containing "error">`
pub const GO_ERROR: &str =
    r"(?<file>([A-Za-z]:[\/])?[^:\n]+):(?<line>\d+):\s*(?<message>.*error.+)";

/// `<file>:<line>:<col>: warning: <message>`
pub const GCC_WARNING: &str = r"(?<file>([A-Za-z]:[\/])?[^:\n]+):(?<line>\d+):(?<col>\d+):\s*(warning):\s*(?<message>.+)";

/// Toolchain whose output format a grammar recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolchain {
    /// GCC and Clang (C/C++)
    Gcc,
    /// OCaml compiler
    OCaml,
    /// Go toolchain
    Go,
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::Gcc => write!(f, "gcc"),
            Toolchain::OCaml => write!(f, "ocaml"),
            Toolchain::Go => write!(f, "go"),
        }
    }
}

/// One compiled grammar.
///
/// Serializes as its source text.
#[derive(Debug, Clone)]
pub struct DiagnosticPattern {
    toolchain: Toolchain,
    severity: Severity,
    regex: Regex,
    multiline: bool,
}

impl DiagnosticPattern {
    fn compile(toolchain: Toolchain, severity: Severity, source: &str) -> Self {
        let regex = Regex::new(source).expect("built-in diagnostic grammar must compile");
        let multiline = source.contains(r"\n(");

        DiagnosticPattern {
            toolchain,
            severity,
            regex,
            multiline,
        }
    }

    /// The toolchain this grammar was written for.
    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// Severity of everything this grammar matches.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Grammar source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a match spans a line and the line after it.
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Named fields this grammar extracts, in order of appearance.
    pub fn fields(&self) -> Vec<&str> {
        self.regex.capture_names().flatten().collect()
    }

    /// Extract a diagnostic from one unit of output text.
    ///
    /// A regex match always yields a diagnostic. Numbers too large for a
    /// `u64` saturate at `u64::MAX`.
    pub fn extract(&self, unit: &str) -> Option<CompilerDiagnostic> {
        let caps = self.regex.captures(unit)?;

        Some(CompilerDiagnostic {
            severity: self.severity,
            toolchain: self.toolchain,
            file: caps.name("file")?.as_str().to_string(),
            line: number(caps.name("line")?),
            col: caps.name("col").map(number),
            col_end: caps.name("col_end").map(number),
            message: caps.name("message")?.as_str().to_string(),
        })
    }
}

/// Captures are all `\d+`, so the only parse failure is overflow.
fn number(m: Match<'_>) -> u64 {
    m.as_str().parse().unwrap_or(u64::MAX)
}

impl Serialize for DiagnosticPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl PartialEq for DiagnosticPattern {
    fn eq(&self, other: &Self) -> bool {
        self.toolchain == other.toolchain
            && self.severity == other.severity
            && self.as_str() == other.as_str()
    }
}

static BUILTIN: LazyLock<PatternRegistry> = LazyLock::new(PatternRegistry::builtin);

/// Immutable table of error and warning grammars.
///
/// Every descriptor carries the full table regardless of what language the
/// target is written in.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    errors: Vec<DiagnosticPattern>,
    warnings: Vec<DiagnosticPattern>,
}

impl PatternRegistry {
    /// The process-wide built-in registry.
    pub fn global() -> &'static PatternRegistry {
        &BUILTIN
    }

    fn builtin() -> Self {
        PatternRegistry {
            errors: vec![
                DiagnosticPattern::compile(Toolchain::Gcc, Severity::Error, GCC_ERROR),
                DiagnosticPattern::compile(Toolchain::OCaml, Severity::Error, OCAML_ERROR),
                DiagnosticPattern::compile(Toolchain::Go, Severity::Error, GO_ERROR),
            ],
            warnings: vec![DiagnosticPattern::compile(
                Toolchain::Gcc,
                Severity::Warning,
                GCC_WARNING,
            )],
        }
    }

    /// Error grammars, in match order.
    pub fn error_patterns(&self) -> &[DiagnosticPattern] {
        &self.errors
    }

    /// Warning grammars, in match order.
    pub fn warning_patterns(&self) -> &[DiagnosticPattern] {
        &self.warnings
    }

    /// Every grammar: errors first, then warnings.
    pub fn all(&self) -> impl Iterator<Item = &DiagnosticPattern> + '_ {
        self.errors.iter().chain(self.warnings.iter())
    }
}
