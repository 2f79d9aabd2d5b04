//! `bazel-provider targets` command

use anyhow::{Context, Result};

use crate::cli::TargetsArgs;
use bazel_provider::discovery::QueryRequest;
use bazel_provider::util::diagnostic::{discovery_warning, emit};
use bazel_provider::util::shell::{format_duration, Status};
use bazel_provider::util::{ConfigSource, GlobalContext};
use bazel_provider::{BazelProvider, ConfigLayer};

pub async fn execute(args: TargetsArgs, ctx: &GlobalContext, overrides: ConfigLayer) -> Result<()> {
    let shell = super::shell(ctx, args.json);
    let root = ctx.resolve_root(args.path.as_deref());

    let source = ctx.config_source(&root, overrides);
    let config = source.load();
    config.validate().context("invalid configuration")?;

    let request = QueryRequest::new(&root, &config);
    let provider = BazelProvider::new(root).with_config(source);

    let spinner = shell.spinner(Status::Querying, request.display_command());
    let discovery = provider.discover().await;
    let elapsed = spinner.finish();

    if let Some(warning) = discovery.warning() {
        if !shell.is_quiet() {
            emit(&discovery_warning(warning), shell.use_color());
        }
    }

    let targets = discovery.targets();
    if shell.is_json() {
        shell.json_document(targets)?;
    } else {
        for target in targets {
            println!("{}", target);
        }
    }

    shell.status(
        Status::Found,
        format!("{} target(s) in {}", targets.len(), format_duration(elapsed)),
    );

    Ok(())
}
