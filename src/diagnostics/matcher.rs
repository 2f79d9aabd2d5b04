//! Apply the grammar table to captured build output.
//!
//! Output is consumed one unit at a time. A unit is a single line, or for a
//! multi-line grammar, a line joined with the line after it. Grammars are
//! tried in registry order (errors, then warnings) and the first match wins;
//! a two-line match consumes both lines.

use super::{CompilerDiagnostic, PatternRegistry};

/// Extract every diagnostic from `output`, in output order.
pub fn match_output(registry: &PatternRegistry, output: &str) -> Vec<CompilerDiagnostic> {
    let lines: Vec<&str> = output.lines().collect();
    let mut diagnostics = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (diagnostic, consumed) = match_unit(registry, lines[i], lines.get(i + 1).copied());
        if let Some(d) = diagnostic {
            diagnostics.push(d);
        }
        i += consumed;
    }

    tracing::debug!(
        "matched {} diagnostic(s) in {} line(s)",
        diagnostics.len(),
        lines.len()
    );

    diagnostics
}

/// Match the unit starting at `line`. Returns the diagnostic and how many
/// lines it used.
fn match_unit(
    registry: &PatternRegistry,
    line: &str,
    next: Option<&str>,
) -> (Option<CompilerDiagnostic>, usize) {
    for pattern in registry.all() {
        if pattern.is_multiline() {
            let Some(next) = next else { continue };
            let unit = format!("{}\n{}", line, next);
            if let Some(d) = pattern.extract(&unit) {
                return (Some(d), 2);
            }
        } else if let Some(d) = pattern.extract(line) {
            return (Some(d), 1);
        }
    }

    (None, 1)
}
