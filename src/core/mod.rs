//! Core data structures.
//!
//! - Build roots and their marker files
//! - Target labels from `bazel query`
//! - Build descriptors returned to the orchestrator

pub mod descriptor;
pub mod root;
pub mod target;

pub use descriptor::{BuildDescriptor, DEFAULT_DESCRIPTOR_NAME};
pub use root::{BuildRoot, MARKER_FILES};
pub use target::Target;
