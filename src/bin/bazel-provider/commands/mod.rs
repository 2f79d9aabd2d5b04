//! Command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod match_output;
pub mod settings;
pub mod targets;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Cli;
use bazel_provider::util::shell::{ColorChoice, Shell};
use bazel_provider::util::GlobalContext;

/// Environment variable that relocates `~/.bazel-provider`.
pub const HOME_ENV: &str = "BAZEL_PROVIDER_HOME";

/// Build the global context from the global flags.
pub fn context(cli: &Cli) -> Result<GlobalContext> {
    let mut ctx = GlobalContext::new()?;
    if let Some(home) = std::env::var_os(HOME_ENV) {
        ctx = ctx.with_home(Some(PathBuf::from(home)));
    }

    ctx.set_verbose(cli.verbose);
    ctx.set_quiet(cli.quiet);
    ctx.set_color(!cli.no_color);
    Ok(ctx)
}

/// Shell for a command; `json` switches stdout to machine-readable output.
pub fn shell(ctx: &GlobalContext, json: bool) -> Shell {
    let color = if ctx.color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    Shell::from_flags(ctx.is_quiet(), ctx.is_verbose(), color, json)
}
