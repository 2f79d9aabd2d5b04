//! bazel-provider CLI - Bazel build provider for build orchestrators

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("bazel_provider=debug")
    } else if cli.quiet {
        EnvFilter::new("bazel_provider=error")
    } else {
        EnvFilter::new("bazel_provider=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = commands::context(&cli)?;
    let overrides = cli.config.overrides();

    // Execute command
    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Targets(args) => commands::targets::execute(args, &ctx, overrides).await,
        Commands::Settings(args) => commands::settings::execute(args, &ctx, overrides).await,
        Commands::Match(args) => commands::match_output::execute(args, &ctx),
        Commands::Config(args) => commands::config::execute(args, &ctx, overrides),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
