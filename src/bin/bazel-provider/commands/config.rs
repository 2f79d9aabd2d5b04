//! `bazel-provider config` command

use anyhow::{Context, Result};

use crate::cli::ConfigCmdArgs;
use bazel_provider::util::config::{project_config_path, CONFIG_OPTIONS};
use bazel_provider::util::process::find_executable;
use bazel_provider::util::{ConfigSource, GlobalContext};
use bazel_provider::ConfigLayer;

pub fn execute(args: ConfigCmdArgs, ctx: &GlobalContext, overrides: ConfigLayer) -> Result<()> {
    let shell = super::shell(ctx, args.json);
    let root = ctx.resolve_root(args.path.as_deref());

    let global_path = ctx.config_path();
    let project_path = project_config_path(&root);
    let config = ctx.config_source(&root, overrides).load();
    let resolved = find_executable(&config.executable);

    if let Err(e) = config.validate() {
        shell.warn(e);
    }

    if shell.is_json() {
        let doc = serde_json::json!({
            "config": config,
            "files": {
                "global": global_path,
                "project": project_path,
            },
            "resolvedExecutable": resolved,
            "options": CONFIG_OPTIONS,
        });
        shell.json_document(&doc)?;
        return Ok(());
    }

    let rendered = toml::to_string_pretty(&config).context("failed to render configuration")?;
    println!("# effective configuration for {}", root.display());
    print!("{}", rendered);

    println!();
    println!("# files (project overrides global)");
    match &global_path {
        Some(path) => println!("#   global:  {}{}", path.display(), presence(path)),
        None => println!("#   global:  (no home directory)"),
    }
    println!("#   project: {}{}", project_path.display(), presence(&project_path));
    match &resolved {
        Some(path) => println!("# `{}` resolves to {}", config.executable, path.display()),
        None => println!("# `{}` was not found on PATH", config.executable),
    }

    println!();
    println!("# options");
    for option in CONFIG_OPTIONS {
        println!("#   {} - {} (default: {})", option.key, option.title, option.default);
        println!("#       {}", option.description);
    }

    Ok(())
}

fn presence(path: &std::path::Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not present)"
    }
}
