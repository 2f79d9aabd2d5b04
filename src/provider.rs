//! The build provider capability.
//!
//! A provider answers three questions for a build orchestrator: what it is
//! called, whether it applies to a directory, and which builds it offers
//! there. [`BazelProvider`] answers them for Bazel by checking for a `BUILD`
//! file, running `bazel query` and turning the result into descriptors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{BuildDescriptor, BuildRoot};
use crate::diagnostics::PatternRegistry;
use crate::discovery::{
    discover, Discovery, DiscoveryWarning, ProcessQueryExecutor, QueryExecutor, QueryRequest,
};
use crate::ops::generate;
use crate::util::config::{ConfigSource, LayeredConfigSource};

/// Display name of the Bazel provider.
pub const NICE_NAME: &str = "Bazel";

/// A source of build descriptors for a project directory.
#[async_trait]
pub trait BuildProvider: Send + Sync {
    /// Short human-readable name.
    fn nice_name(&self) -> &str;

    /// Whether this provider applies to its root.
    fn is_eligible(&self) -> bool;

    /// The builds on offer, default first.
    ///
    /// Never fails: problems are reported out of band and the list degrades
    /// to the default descriptor alone.
    async fn settings(&self) -> Vec<BuildDescriptor>;
}

/// Receives advisories produced while computing settings.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, warning: &DiscoveryWarning);
}

impl<F> ErrorReporter for F
where
    F: Fn(&DiscoveryWarning) + Send + Sync,
{
    fn report(&self, warning: &DiscoveryWarning) {
        self(warning)
    }
}

/// Reports advisories as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, warning: &DiscoveryWarning) {
        tracing::warn!("could not list Bazel targets: {}", warning);
    }
}

/// Build provider for Bazel workspaces.
pub struct BazelProvider {
    root: BuildRoot,
    config: Arc<dyn ConfigSource>,
    executor: Arc<dyn QueryExecutor>,
    reporter: Arc<dyn ErrorReporter>,
    registry: &'static PatternRegistry,
}

impl BazelProvider {
    /// Create a provider for `root` with live layered configuration, a real
    /// `bazel` subprocess and `tracing` reporting.
    pub fn new(root: impl Into<BuildRoot>) -> Self {
        let root = root.into();
        let config = LayeredConfigSource::new(root.path());
        BazelProvider {
            root,
            config: Arc::new(config),
            executor: Arc::new(ProcessQueryExecutor),
            reporter: Arc::new(TracingReporter),
            registry: PatternRegistry::global(),
        }
    }

    /// Use a different configuration source.
    pub fn with_config(mut self, config: impl ConfigSource + 'static) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Use a different query executor.
    pub fn with_executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Use a different error reporting channel.
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// The project root.
    pub fn root(&self) -> &BuildRoot {
        &self.root
    }

    /// Grammars attached to every descriptor.
    pub fn registry(&self) -> &'static PatternRegistry {
        self.registry
    }

    /// Run target discovery with the current configuration.
    ///
    /// Does not report: the caller decides what to do with a degraded result.
    pub async fn discover(&self) -> Discovery {
        let config = self.config.load();
        let request = QueryRequest::new(self.root.path(), &config);
        discover(self.executor.as_ref(), &request).await
    }
}

impl std::fmt::Debug for BazelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BazelProvider")
            .field("root", &self.root.path())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BuildProvider for BazelProvider {
    fn nice_name(&self) -> &str {
        NICE_NAME
    }

    fn is_eligible(&self) -> bool {
        self.root.is_eligible()
    }

    async fn settings(&self) -> Vec<BuildDescriptor> {
        // One snapshot per cycle so discovery and generation agree.
        let config = self.config.load();
        let request = QueryRequest::new(self.root.path(), &config);

        let (targets, warning) = discover(self.executor.as_ref(), &request)
            .await
            .into_parts();
        if let Some(warning) = warning {
            self.reporter.report(&warning);
        }

        generate(self.root.path(), &targets, &config, self.registry)
    }
}
