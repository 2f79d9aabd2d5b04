//! User-friendly diagnostic messages.
//!
//! Every message the CLI prints for a problem names the root cause and, where
//! one exists, the fix.

use std::fmt;
use std::path::Path;

use crate::discovery::DiscoveryWarning;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the directory has no marker file.
    pub const NO_BUILD_FILE: &str =
        "Create a `BUILD` file in the project root (a `BUILD.bazel` alone is not recognized)";

    /// Suggestion when the query executable is missing.
    pub const INSTALL_BAZEL: &str =
        "Install Bazel (or Bazelisk) and make sure it is on PATH, or set `executable` in .bazel-provider/config.toml";

    /// Suggestion when the query ran but failed.
    pub const QUERY_FAILED: &str =
        "Run the query by hand in the project root to see Bazel's full output";

    /// Suggestion when the target filter is suspect.
    pub const CHECK_FILTER: &str =
        "Check `target-filter` with `bazel-provider config`; the default is `:all`";
}

/// Severity level for CLI messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub level: Level,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            level,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let level = if color {
            match self.level {
                Level::Error => "\x1b[1;31merror\x1b[0m",
                Level::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.level {
                Level::Error => "error",
                Level::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", level, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  | {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            output.push_str(&format!("{}: consider:\n", help));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Explain why a directory is not a Bazel build root.
pub fn not_eligible(root: &Path, markers: &[&str]) -> Diagnostic {
    Diagnostic::error(format!("`{}` is not a Bazel build root", root.display()))
        .with_context(format!("looked for {} in {}", markers.join(", "), root.display()))
        .with_suggestion(suggestions::NO_BUILD_FILE)
}

/// Turn a degraded discovery into an actionable warning.
pub fn discovery_warning(warning: &DiscoveryWarning) -> Diagnostic {
    let mut lines = warning.message().lines();
    let headline = lines.next().unwrap_or_default();

    let mut diag = Diagnostic::warning(format!("could not list Bazel targets: {}", headline));
    for line in lines.filter(|l| !l.trim().is_empty()) {
        diag = diag.with_context(line);
    }

    if warning.message().starts_with("failed to spawn") {
        diag.with_suggestion(suggestions::INSTALL_BAZEL)
    } else {
        diag.with_suggestion(suggestions::QUERY_FAILED)
            .with_suggestion(suggestions::CHECK_FILTER)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
