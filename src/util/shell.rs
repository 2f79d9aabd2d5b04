//! Centralized shell output.
//!
//! All CLI chatter goes through [`Shell`]:
//! - Status messages with consistent formatting on stderr
//! - A spinner (via indicatif) while `bazel query` runs
//! - JSON output mode for machine-readable output on stdout
//!
//! JSON and human output are mutually exclusive: in JSON mode status lines
//! are suppressed so stdout stays parseable.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors and a spinner.
    Human {
        verbosity: Verbosity,
        color: ColorChoice,
    },
    /// Machine-readable JSON output only.
    Json,
}

/// Output verbosity level (Human mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// --quiet: no status lines, no spinner
    Quiet,
    /// Default: status messages + spinner
    Normal,
    /// --verbose: status lines, no spinner
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    Auto,
    /// Never use ANSI colors (`--no-color`).
    Never,
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success (green)
    Eligible,
    Finished,
    Found,

    // In progress (cyan)
    Querying,

    // Info (blue)
    Info,

    // Warning (yellow)
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Eligible => "Eligible",
            Status::Finished => "Finished",
            Status::Found => "Found",
            Status::Querying => "Querying",
            Status::Info => "Info",
            Status::Warning => "Warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Eligible | Status::Finished | Status::Found => "\x1b[1;32m",
            Status::Querying => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Warning => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Create a shell from CLI flags.
    ///
    /// JSON mode takes precedence over quiet/verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        let mode = if json {
            ShellMode::Json
        } else {
            let verbosity = if quiet {
                Verbosity::Quiet
            } else if verbose {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            };
            ShellMode::Human { verbosity, color }
        };

        Shell::new(mode)
    }

    /// Check if shell is in quiet mode.
    pub fn is_quiet(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Quiet,
                ..
            }
        )
    }

    /// Check if shell is in verbose mode.
    pub fn is_verbose(&self) -> bool {
        matches!(
            self.mode,
            ShellMode::Human {
                verbosity: Verbosity::Verbose,
                ..
            }
        )
    }

    /// Check if shell is in JSON mode.
    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message to stderr.
    ///
    /// Format: `{status:>12} {message}`. Quiet and JSON modes print nothing.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() || self.is_quiet() {
            return;
        }

        eprintln!("{} {}", self.format_status(status), msg);
    }

    /// Print an info message.
    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print a JSON document to stdout, pretty-printed.
    pub fn json_document<T: serde::Serialize + ?Sized>(&self, value: &T) -> serde_json::Result<()> {
        let json_str = serde_json::to_string_pretty(value)?;
        println!("{}", json_str);
        let _ = io::stdout().flush();
        Ok(())
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();

        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }

    /// Start a spinner for a long-running step.
    ///
    /// Only animates on an interactive stderr in normal verbosity; otherwise
    /// the status line is printed once (verbose) or not at all.
    pub fn spinner(&self, status: Status, msg: impl Display) -> Spinner {
        let message = msg.to_string();
        let animate = !self.is_quiet()
            && !self.is_verbose()
            && !self.is_json()
            && io::stderr().is_terminal();

        let pb = if animate {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(format!("{} {}", status.as_str(), message));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            if self.is_verbose() {
                self.status(status, &message);
            }
            None
        };

        Spinner {
            pb,
            start: Instant::now(),
        }
    }
}

/// A running spinner; clears itself when finished or dropped.
pub struct Spinner {
    pb: Option<ProgressBar>,
    start: Instant,
}

impl Spinner {
    /// Stop and clear the spinner, returning how long it ran.
    pub fn finish(self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}
