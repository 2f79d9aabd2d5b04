//! High-level operations.
//!
//! This module contains the operations behind the provider and its CLI.

pub mod generate;

pub use generate::generate;
