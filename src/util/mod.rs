//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod process;
pub mod shell;

pub use config::{ConfigLayer, ConfigSource, LayeredConfigSource, ProviderConfig};
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
pub use shell::Shell;
