//! Global context for CLI operations.
//!
//! Provides centralized access to the working directory, configuration
//! locations and output preferences.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{
    global_config_dir, project_config_path, ConfigLayer, LayeredConfigSource,
};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global provider data (~/.bazel-provider/)
    home: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to print errors only
    quiet: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            home: global_config_dir(),
            verbose: false,
            quiet: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory (tests, or `BAZEL_PROVIDER_HOME`).
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set quiet mode.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the home directory, if one could be determined.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|home| home.join("config.toml"))
    }

    /// Resolve a user-supplied root (relative to cwd), defaulting to cwd.
    pub fn resolve_root(&self, path: Option<&Path>) -> PathBuf {
        match path {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.cwd.join(path),
            None => self.cwd.clone(),
        }
    }

    /// Live configuration for a root: global file, project file, then
    /// `overrides`.
    pub fn config_source(&self, root: &Path, overrides: ConfigLayer) -> LayeredConfigSource {
        LayeredConfigSource::with_paths(self.config_path(), project_config_path(root))
            .with_overrides(overrides)
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}
