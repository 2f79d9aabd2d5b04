//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.bazel-provider/config.toml` - User-wide defaults
//! - Project: `.bazel-provider/config.toml` - Per-root overrides
//!
//! Project config takes precedence over global config. Empty strings in a
//! file are ignored so a blank value never replaces a usable one.
//!
//! ```toml
//! executable = "bazelisk"
//! command = "test"
//! target-filter = 'kind(".*test", :all)'
//! query-timeout = 30
//! ```

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Bazel binary.
pub const DEFAULT_EXECUTABLE: &str = "bazel";

/// Default build subcommand.
pub const DEFAULT_COMMAND: &str = "build";

/// Default query expression: every target in the root package.
pub const DEFAULT_TARGET_FILTER: &str = ":all";

/// Configuration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A required string option is empty
    #[error("configuration option `{field}` must not be empty")]
    #[diagnostic(code(bazel_provider::config::empty_value))]
    EmptyValue { field: &'static str },

    /// Config file could not be read
    #[error("failed to read config file: {}", path.display())]
    #[diagnostic(code(bazel_provider::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file: {}", path.display())]
    #[diagnostic(
        code(bazel_provider::config::parse),
        help("Keys are kebab-case: executable, command, target-filter, query-timeout")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one discovery + generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Binary invoked for both query and build
    pub executable: String,

    /// Build subcommand (`build`, `test`, ...)
    pub command: String,

    /// Query expression used to enumerate targets
    pub target_filter: String,

    /// Give up on the query after this many seconds (None = wait forever)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_timeout: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            executable: DEFAULT_EXECUTABLE.to_string(),
            command: DEFAULT_COMMAND.to_string(),
            target_filter: DEFAULT_TARGET_FILTER.to_string(),
            query_timeout: None,
        }
    }
}

/// One layer of configuration: a config file, or command-line overrides.
///
/// Only the keys a layer actually sets are `Some`; defaults are applied once,
/// by [`ConfigLayer::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigLayer {
    pub executable: Option<String>,
    pub command: Option<String>,
    pub target_filter: Option<String>,
    pub query_timeout: Option<u64>,
}

/// Documentation for one configuration option.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfigOption {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub default: &'static str,
}

/// All configuration options, in display order.
pub const CONFIG_OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        key: "command",
        title: "Bazel command",
        description: "The Bazel command to execute the build. Use `build` for just building, \
                      use `test` for building and running tests.",
        default: DEFAULT_COMMAND,
    },
    ConfigOption {
        key: "executable",
        title: "Bazel executable",
        description: "The Bazel executable.",
        default: DEFAULT_EXECUTABLE,
    },
    ConfigOption {
        key: "target-filter",
        title: "Target extraction query",
        description: "Use `:all` to extract all targets. Use `kind(\".*test\", :all)` for test \
                      targets. See `bazel help query` for details.",
        default: DEFAULT_TARGET_FILTER,
    },
    ConfigOption {
        key: "query-timeout",
        title: "Query timeout",
        description: "Seconds to wait for `bazel query` before falling back to the default \
                      target only.",
        default: "none",
    },
];

impl ConfigLayer {
    /// Load a layer from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a layer, treating a missing or broken file as setting nothing.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{}: {}", e, e.source_message());
            Self::default()
        })
    }

    /// Merge another layer into this one (other takes precedence).
    ///
    /// Empty strings in `other` are skipped.
    pub fn merge(&mut self, other: ConfigLayer) {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        if let Some(executable) = non_empty(other.executable) {
            self.executable = Some(executable);
        }
        if let Some(command) = non_empty(other.command) {
            self.command = Some(command);
        }
        if let Some(filter) = non_empty(other.target_filter) {
            self.target_filter = Some(filter);
        }
        if other.query_timeout.is_some() {
            self.query_timeout = other.query_timeout;
        }
    }

    /// Fill every unset key with its default.
    pub fn resolve(self) -> ProviderConfig {
        let mut config = ProviderConfig::default();
        if let Some(executable) = self.executable.filter(|v| !v.is_empty()) {
            config.executable = executable;
        }
        if let Some(command) = self.command.filter(|v| !v.is_empty()) {
            config.command = command;
        }
        if let Some(filter) = self.target_filter.filter(|v| !v.is_empty()) {
            config.target_filter = filter;
        }
        config.query_timeout = self.query_timeout;
        config
    }
}

impl ProviderConfig {
    /// Check that every string option is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.executable.is_empty() {
            return Err(ConfigError::EmptyValue { field: "executable" });
        }
        if self.command.is_empty() {
            return Err(ConfigError::EmptyValue { field: "command" });
        }
        if self.target_filter.is_empty() {
            return Err(ConfigError::EmptyValue {
                field: "target-filter",
            });
        }
        Ok(())
    }
}

impl ConfigError {
    fn source_message(&self) -> String {
        match self {
            ConfigError::EmptyValue { .. } => String::new(),
            ConfigError::Read { source, .. } => source.to_string(),
            ConfigError::Parse { source, .. } => source.message().to_string(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.bazel-provider/config.toml)
/// 2. Global config (~/.bazel-provider/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> ProviderConfig {
    load_layers(global_path, project_path).resolve()
}

fn load_layers(global_path: &Path, project_path: &Path) -> ConfigLayer {
    let mut layer = ConfigLayer::load_or_empty(global_path);
    layer.merge(ConfigLayer::load_or_empty(project_path));
    layer
}

/// Get the global config directory (~/.bazel-provider).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".bazel-provider"))
}

/// Get the global config path (~/.bazel-provider/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.bazel-provider/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".bazel-provider").join("config.toml")
}

/// Where a provider gets its configuration from.
///
/// Called once per discovery cycle, so an implementation backed by live
/// settings picks up edits between cycles.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> ProviderConfig;
}

impl ConfigSource for ProviderConfig {
    fn load(&self) -> ProviderConfig {
        self.clone()
    }
}

/// Re-reads the global and project config files on every cycle, then applies
/// fixed overrides on top.
#[derive(Debug, Clone)]
pub struct LayeredConfigSource {
    global_path: Option<PathBuf>,
    project_path: PathBuf,
    overrides: ConfigLayer,
}

impl LayeredConfigSource {
    /// Layer the standard config locations for a project root.
    pub fn new(project_root: &Path) -> Self {
        LayeredConfigSource {
            global_path: global_config_path(),
            project_path: project_config_path(project_root),
            overrides: ConfigLayer::default(),
        }
    }

    /// Use explicit file locations.
    pub fn with_paths(global_path: Option<PathBuf>, project_path: PathBuf) -> Self {
        LayeredConfigSource {
            global_path,
            project_path,
            overrides: ConfigLayer::default(),
        }
    }

    /// Values that win over both files. Empty strings are ignored.
    pub fn with_overrides(mut self, overrides: ConfigLayer) -> Self {
        self.overrides = overrides;
        self
    }
}

impl ConfigSource for LayeredConfigSource {
    fn load(&self) -> ProviderConfig {
        let global = self.global_path.clone().unwrap_or_default();
        let mut layer = load_layers(&global, &self.project_path);
        layer.merge(self.overrides.clone());
        layer.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.executable, "bazel");
        assert_eq!(config.command, "build");
        assert_eq!(config.target_filter, ":all");
        assert!(config.query_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layer_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
executable = "bazelisk"
command = "test"
target-filter = 'kind(".*test", :all)'
query-timeout = 30
"#,
        )
        .unwrap();

        let config = ConfigLayer::load(&config_path).unwrap().resolve();
        assert_eq!(config.executable, "bazelisk");
        assert_eq!(config.command, "test");
        assert_eq!(config.target_filter, r#"kind(".*test", :all)"#);
        assert_eq!(config.query_timeout, Some(30));
    }

    #[test]
    fn test_partial_layer_leaves_other_keys_unset() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "command = \"test\"\n").unwrap();

        let layer = ConfigLayer::load(&config_path).unwrap();
        assert_eq!(layer.command.as_deref(), Some("test"));
        assert_eq!(layer.executable, None);
        assert_eq!(layer.target_filter, None);

        let config = layer.resolve();
        assert_eq!(config.executable, "bazel");
        assert_eq!(config.command, "test");
    }

    #[test]
    fn test_layer_load_invalid() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "query-timeout = \"soon\"\n").unwrap();

        let err = ConfigLayer::load(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(ConfigLayer::load_or_empty(&config_path), ConfigLayer::default());
    }

    #[test]
    fn test_layer_merge_skips_unset_and_empty() {
        let mut base = ConfigLayer {
            executable: Some("bazelisk".to_string()),
            command: Some("test".to_string()),
            ..ConfigLayer::default()
        };

        base.merge(ConfigLayer {
            command: Some(String::new()),
            target_filter: Some("//...".to_string()),
            ..ConfigLayer::default()
        });

        assert_eq!(base.executable.as_deref(), Some("bazelisk"));
        assert_eq!(base.command.as_deref(), Some("test")); // Not overridden by the empty string
        assert_eq!(base.target_filter.as_deref(), Some("//..."));
    }

    #[test]
    fn test_empty_layer_resolves_to_defaults() {
        assert_eq!(ConfigLayer::default().resolve(), ProviderConfig::default());

        let blank = ConfigLayer {
            executable: Some(String::new()),
            ..ConfigLayer::default()
        };
        assert_eq!(blank.resolve().executable, "bazel");
    }

    #[test]
    fn test_validate_rejects_empty() {
        let mut config = ProviderConfig::default();
        config.target_filter = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyValue {
                field: "target-filter"
            }
        ));
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "executable = \"/opt/bazel/bin/bazel\"\ncommand = \"test\"\n",
        )
        .unwrap();
        std::fs::write(&project_path, "command = \"run\"\n").unwrap();

        let config = load_config(&global_path, &project_path);

        // Project config should override command
        assert_eq!(config.command, "run");
        // Global executable should be preserved
        assert_eq!(config.executable, "/opt/bazel/bin/bazel");
        assert_eq!(config.target_filter, ":all");
    }

    #[test]
    fn test_load_config_disjoint_layers() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "executable = \"bazelisk\"\ntarget-filter = \"//...\"\n",
        )
        .unwrap();
        std::fs::write(&project_path, "command = \"test\"\n").unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.executable, "bazelisk");
        assert_eq!(config.command, "test");
        assert_eq!(config.target_filter, "//...");
    }

    #[test]
    fn test_broken_project_file_keeps_global_values() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "executable = \"bazelisk\"\ncommand = \"test\"\n",
        )
        .unwrap();
        std::fs::write(&project_path, "command = [not toml\n").unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.executable, "bazelisk");
        assert_eq!(config.command, "test");
    }

    #[test]
    fn test_layered_source_rereads_files() {
        let tmp = TempDir::new().unwrap();
        let project_path = tmp.path().join("config.toml");
        let source = LayeredConfigSource::with_paths(None, project_path.clone());

        assert_eq!(source.load().command, "build");

        std::fs::write(&project_path, "command = \"test\"\n").unwrap();
        assert_eq!(source.load().command, "test");
    }

    #[test]
    fn test_layered_source_overrides_win() {
        let tmp = TempDir::new().unwrap();
        let project_path = tmp.path().join("config.toml");
        std::fs::write(&project_path, "executable = \"bazelisk\"\ncommand = \"test\"\n").unwrap();

        let overrides = ConfigLayer {
            command: Some("coverage".to_string()),
            query_timeout: Some(5),
            ..ConfigLayer::default()
        };
        let config = LayeredConfigSource::with_paths(None, project_path)
            .with_overrides(overrides)
            .load();

        assert_eq!(config.executable, "bazelisk");
        assert_eq!(config.command, "coverage");
        assert_eq!(config.query_timeout, Some(5));
    }

    #[test]
    fn test_option_docs_cover_every_key() {
        let keys: Vec<&str> = CONFIG_OPTIONS.iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            vec!["command", "executable", "target-filter", "query-timeout"]
        );
    }
}
