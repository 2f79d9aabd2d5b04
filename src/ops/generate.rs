//! Build descriptor generation.

use std::path::Path;

use crate::core::descriptor::{target_descriptor_name, BuildDescriptor, DEFAULT_DESCRIPTOR_NAME};
use crate::core::Target;
use crate::diagnostics::PatternRegistry;
use crate::util::config::ProviderConfig;

/// Produce the descriptor list for a root.
///
/// The default descriptor (`<command>` with no target) is always first,
/// followed by one descriptor per target in input order. Every descriptor
/// carries the registry's full error and warning pattern sets.
pub fn generate(
    root: &Path,
    targets: &[Target],
    config: &ProviderConfig,
    registry: &PatternRegistry,
) -> Vec<BuildDescriptor> {
    let mut descriptors = Vec::with_capacity(targets.len() + 1);

    descriptors.push(descriptor(
        DEFAULT_DESCRIPTOR_NAME.to_string(),
        vec![config.command.clone()],
        root,
        config,
        registry,
    ));

    for target in targets {
        descriptors.push(descriptor(
            target_descriptor_name(target.as_str()),
            vec![config.command.clone(), target.as_str().to_string()],
            root,
            config,
            registry,
        ));
    }

    tracing::debug!(
        "generated {} descriptor(s) for {}",
        descriptors.len(),
        root.display()
    );

    descriptors
}

fn descriptor(
    name: String,
    arguments: Vec<String>,
    root: &Path,
    config: &ProviderConfig,
    registry: &PatternRegistry,
) -> BuildDescriptor {
    BuildDescriptor {
        name,
        executable: config.executable.clone(),
        arguments,
        cwd: root.to_path_buf(),
        shell_invocation: false,
        error_patterns: registry.error_patterns().to_vec(),
        warning_patterns: registry.warning_patterns().to_vec(),
    }
}
