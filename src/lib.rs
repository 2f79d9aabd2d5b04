//! bazel-provider - Bazel build provider for build orchestrators
//!
//! Given a project directory, this crate decides whether Bazel applies
//! (a `BUILD` file at the root), asks `bazel query` which targets exist, and
//! turns them into build descriptors: a default build plus one per target,
//! each carrying the compiler diagnostic grammars an orchestrator needs to
//! parse the build output.
//!
//! ```rust,ignore
//! use bazel_provider::{BazelProvider, BuildProvider};
//!
//! let provider = BazelProvider::new(std::path::Path::new("/work/project"));
//! if provider.is_eligible() {
//!     for descriptor in provider.settings().await {
//!         println!("{}: {}", descriptor.name, descriptor.display_command());
//!     }
//! }
//! ```

pub mod core;
pub mod diagnostics;
pub mod discovery;
pub mod ops;
pub mod provider;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only compiled for tests. Provides a canned query executor and build-root
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildDescriptor, BuildRoot, Target, DEFAULT_DESCRIPTOR_NAME};
pub use diagnostics::{match_output, CompilerDiagnostic, DiagnosticPattern, PatternRegistry};
pub use discovery::{discover, Discovery, DiscoveryError, DiscoveryWarning, QueryExecutor};
pub use provider::{BazelProvider, BuildProvider, ErrorReporter, TracingReporter};
pub use util::config::{ConfigLayer, ConfigSource, ProviderConfig};
pub use util::context::GlobalContext;
