//! Test fixtures for common test scenarios.
//!
//! Build roots on disk plus canned `bazel query` and compiler output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixture for a directory that may or may not be a Bazel build root.
#[derive(Debug, Clone, Default)]
pub struct BuildRootFixture {
    /// Files (path relative to the root -> content).
    pub files: BTreeMap<PathBuf, String>,
    /// Project-level provider configuration, if any.
    pub config: Option<String>,
}

impl BuildRootFixture {
    /// An empty directory, not eligible.
    pub fn empty() -> Self {
        BuildRootFixture::default()
    }

    /// A minimal eligible root with a `BUILD` file and a single package.
    pub fn bazel() -> Self {
        BuildRootFixture::empty()
            .with_file("BUILD", "cc_binary(name = \"app\", srcs = [\"main.cc\"])\n")
            .with_file("main.cc", "int main() { return 0; }\n")
    }

    /// A root that only uses `BUILD.bazel`, which is not recognized as a marker.
    pub fn bazel_dot_build_only() -> Self {
        BuildRootFixture::empty().with_file("BUILD.bazel", "exports_files([])\n")
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Set `.bazel-provider/config.toml` content.
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Write this fixture under `base_path`, returning the root.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(base_path)?;

        for (rel_path, content) in &self.files {
            let full_path = base_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        if let Some(config) = &self.config {
            let dir = base_path.join(".bazel-provider");
            std::fs::create_dir_all(&dir)?;
            std::fs::write(dir.join("config.toml"), config)?;
        }

        Ok(base_path.to_path_buf())
    }

    /// Write into a fresh temporary directory.
    pub fn create(&self) -> std::io::Result<tempfile::TempDir> {
        let tmp = tempfile::TempDir::new()?;
        self.write_to(tmp.path())?;
        Ok(tmp)
    }
}

/// Canned `bazel query` output.
pub mod query_outputs {
    use super::super::MockQueryOutput;

    /// One label per line, LF-terminated.
    pub fn labels(labels: &[&str]) -> MockQueryOutput {
        let mut stdout = labels.join("\n");
        stdout.push('\n');
        MockQueryOutput::stdout(stdout)
    }

    /// What Bazel prints when the filter matches nothing.
    pub fn empty_results() -> MockQueryOutput {
        MockQueryOutput::stdout("INFO: Empty results\n")
    }

    /// Bazel run outside a workspace.
    pub fn not_a_workspace() -> MockQueryOutput {
        MockQueryOutput::exit(
            2,
            "ERROR: The 'query' command is only supported from within a workspace \
             (below a directory having a WORKSPACE file).",
        )
    }

    /// Bazel not installed.
    pub fn not_installed() -> MockQueryOutput {
        MockQueryOutput::spawn_error("No such file or directory (os error 2)")
    }
}

/// Canned compiler output as it appears in a Bazel build log.
pub mod compiler_outputs {
    /// A gcc/clang error.
    pub fn gcc_error(file: &str, line: u32, col: u32, message: &str) -> String {
        format!("{}:{}:{}: error: {}", file, line, col, message)
    }

    /// A gcc/clang warning.
    pub fn gcc_warning(file: &str, line: u32, col: u32, message: &str) -> String {
        format!("{}:{}:{}: warning: {}", file, line, col, message)
    }

    /// A two-line OCaml error.
    pub fn ocaml_error(file: &str, line: u32, start: u32, end: u32, message: &str) -> String {
        format!(
            "File \"{}\", line {}, characters {}-{}:\n{}",
            file, line, start, end, message
        )
    }

    /// A Go compiler error.
    pub fn go_error(file: &str, line: u32, message: &str) -> String {
        format!("{}:{}: {}", file, line, message)
    }

    /// A full failing build log with a mix of noise and diagnostics.
    pub fn failing_build() -> String {
        [
            "INFO: Analyzed target //app:app (0 packages loaded, 0 targets configured).",
            "INFO: Found 1 target...",
            &gcc_warning("app/util.cc", 3, 7, "unused variable 'x' [-Wunused-variable]"),
            &gcc_error("app/main.cc", 10, 5, "'foo' was not declared in this scope"),
            "Target //app:app failed to build",
            "INFO: Elapsed time: 0.412s, Critical Path: 0.31s",
            "FAILED: Build did NOT complete successfully",
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildRoot;

    #[test]
    fn test_bazel_fixture_is_eligible() {
        let tmp = BuildRootFixture::bazel().create().unwrap();
        assert!(BuildRoot::new(tmp.path()).is_eligible());
    }

    #[test]
    fn test_empty_fixture_is_not_eligible() {
        let tmp = BuildRootFixture::empty().create().unwrap();
        assert!(!BuildRoot::new(tmp.path()).is_eligible());
    }

    #[test]
    fn test_fixture_writes_config() {
        let tmp = BuildRootFixture::bazel()
            .with_config("target-filter = \"//...\"\n")
            .create()
            .unwrap();

        let config = std::fs::read_to_string(tmp.path().join(".bazel-provider/config.toml")).unwrap();
        assert!(config.contains("//..."));
    }

    #[test]
    fn test_compiler_output_templates() {
        assert_eq!(
            compiler_outputs::gcc_error("a.c", 1, 2, "boom"),
            "a.c:1:2: error: boom"
        );
        assert!(compiler_outputs::ocaml_error("a.ml", 1, 2, 3, "oops").contains("\noops"));
        assert!(compiler_outputs::failing_build().contains("app/main.cc:10:5: error:"));
    }
}
