//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bazel_provider::ConfigLayer;

/// bazel-provider - Bazel build provider for build orchestrators
#[derive(Parser)]
#[command(name = "bazel-provider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a directory is a Bazel build root
    Check(PathArgs),

    /// List the targets `bazel query` reports
    Targets(TargetsArgs),

    /// Print the build descriptors offered for a directory
    Settings(SettingsArgs),

    /// Extract compiler diagnostics from build output
    Match(MatchArgs),

    /// Show the effective configuration and available options
    Config(ConfigCmdArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Configuration overrides; these win over both config files.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// Bazel executable
    #[arg(long, global = true, env = "BAZEL_PROVIDER_EXECUTABLE")]
    pub executable: Option<String>,

    /// Bazel command used for builds (build, test, ...)
    #[arg(long = "command", global = true, value_name = "COMMAND")]
    pub build_command: Option<String>,

    /// Query expression used to list targets
    #[arg(long, global = true, value_name = "QUERY")]
    pub target_filter: Option<String>,

    /// Give up on the query after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ConfigArgs {
    /// Overrides to layer on top of the config files.
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            executable: self.executable.clone(),
            command: self.build_command.clone(),
            target_filter: self.target_filter.clone(),
            query_timeout: self.timeout,
        }
    }
}

#[derive(Args)]
pub struct PathArgs {
    /// Project root (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Project root (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Print a JSON array instead of one target per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Project root (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MatchArgs {
    /// File with build output (reads stdin when omitted or `-`)
    pub file: Option<PathBuf>,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigCmdArgs {
    /// Project root (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
