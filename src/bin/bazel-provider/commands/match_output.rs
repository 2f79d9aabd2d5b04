//! `bazel-provider match` command

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::MatchArgs;
use bazel_provider::diagnostics::{match_output, PatternRegistry, Severity};
use bazel_provider::util::shell::Status;
use bazel_provider::util::GlobalContext;

pub fn execute(args: MatchArgs, ctx: &GlobalContext) -> Result<()> {
    let shell = super::shell(ctx, args.json);

    let output = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build output: {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read build output from stdin")?;
            buf
        }
    };

    let diagnostics = match_output(PatternRegistry::global(), &output);

    if shell.is_json() {
        shell.json_document(&diagnostics)?;
        return Ok(());
    }

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    shell.status(
        Status::Found,
        format!(
            "{} error(s), {} warning(s)",
            errors,
            diagnostics.len() - errors
        ),
    );

    Ok(())
}
