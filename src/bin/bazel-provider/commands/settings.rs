//! `bazel-provider settings` command
//!
//! Runs one full provider cycle and prints the descriptors, exactly what an
//! orchestrator would receive.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::cli::SettingsArgs;
use bazel_provider::discovery::DiscoveryWarning;
use bazel_provider::util::diagnostic::{discovery_warning, emit, suggestions};
use bazel_provider::util::shell::Status;
use bazel_provider::util::{ConfigSource, GlobalContext};
use bazel_provider::{BazelProvider, BuildProvider, ConfigLayer};

pub async fn execute(args: SettingsArgs, ctx: &GlobalContext, overrides: ConfigLayer) -> Result<()> {
    let shell = super::shell(ctx, args.json);
    let root = ctx.resolve_root(args.path.as_deref());

    let source = ctx.config_source(&root, overrides);
    source.load().validate().context("invalid configuration")?;

    let warnings: Arc<Mutex<Vec<DiscoveryWarning>>> = Arc::default();
    let sink = Arc::clone(&warnings);
    let provider = BazelProvider::new(root)
        .with_config(source)
        .with_reporter(move |warning: &DiscoveryWarning| {
            if let Ok(mut sink) = sink.lock() {
                sink.push(warning.clone());
            }
        });

    if !provider.is_eligible() {
        shell.warn(format!(
            "{} has no BUILD file; orchestrators will not offer {} here",
            provider.root().path().display(),
            provider.nice_name()
        ));
        shell.note(suggestions::NO_BUILD_FILE);
    }

    let spinner = shell.spinner(Status::Querying, provider.root().path().display());
    let descriptors = provider.settings().await;
    drop(spinner);

    if !shell.is_quiet() {
        if let Ok(warnings) = warnings.lock() {
            for warning in warnings.iter() {
                emit(&discovery_warning(warning), shell.use_color());
            }
        }
    }

    if shell.is_json() {
        shell.json_document(&descriptors)?;
        return Ok(());
    }

    for descriptor in &descriptors {
        println!("{}", descriptor.name);
        println!("    {}", descriptor.display_command());
        if shell.is_verbose() {
            for pattern in descriptor
                .error_patterns
                .iter()
                .chain(&descriptor.warning_patterns)
            {
                println!("    {} ({}): {}", pattern.severity(), pattern.toolchain(), pattern.as_str());
            }
        }
    }

    shell.status(
        Status::Finished,
        format!("{} descriptor(s)", descriptors.len()),
    );

    Ok(())
}
