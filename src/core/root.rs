//! Build root - the directory a provider instance is bound to.
//!
//! A directory is a Bazel build root when a marker file sits directly under
//! it. The markers found are computed once and cached on the instance, so
//! later steps (and repeated eligibility checks) reuse the same answer.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Marker files whose presence makes a directory buildable.
pub const MARKER_FILES: &[&str] = &["BUILD"];

/// A project directory with its cached marker files.
#[derive(Debug)]
pub struct BuildRoot {
    path: PathBuf,
    markers: OnceLock<Vec<PathBuf>>,
}

impl BuildRoot {
    /// Create a build root for a directory. No I/O happens here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BuildRoot {
            path: path.into(),
            markers: OnceLock::new(),
        }
    }

    /// The root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Marker files present directly under the root.
    ///
    /// The filesystem is consulted on first use only. Errors from `stat`
    /// count as "not present".
    pub fn marker_files(&self) -> &[PathBuf] {
        self.markers.get_or_init(|| find_markers(&self.path))
    }

    /// Whether this root is buildable by Bazel.
    pub fn is_eligible(&self) -> bool {
        !self.marker_files().is_empty()
    }
}

impl From<&Path> for BuildRoot {
    fn from(path: &Path) -> Self {
        BuildRoot::new(path)
    }
}

impl From<PathBuf> for BuildRoot {
    fn from(path: PathBuf) -> Self {
        BuildRoot::new(path)
    }
}

fn find_markers(root: &Path) -> Vec<PathBuf> {
    let markers: Vec<PathBuf> = MARKER_FILES
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.try_exists().unwrap_or(false))
        .collect();

    tracing::debug!(
        "found {} marker file(s) under {}",
        markers.len(),
        root.display()
    );

    markers
}
