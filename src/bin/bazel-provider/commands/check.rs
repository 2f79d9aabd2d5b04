//! `bazel-provider check` command

use anyhow::Result;

use crate::cli::PathArgs;
use bazel_provider::core::{BuildRoot, MARKER_FILES};
use bazel_provider::util::diagnostic::{emit, not_eligible};
use bazel_provider::util::shell::Status;
use bazel_provider::util::GlobalContext;

pub fn execute(args: PathArgs, ctx: &GlobalContext) -> Result<()> {
    let shell = super::shell(ctx, false);
    let root = BuildRoot::new(ctx.resolve_root(args.path.as_deref()));

    // Exit with error code if the root has no marker file
    if !root.is_eligible() {
        emit(&not_eligible(root.path(), MARKER_FILES), shell.use_color());
        std::process::exit(1);
    }

    shell.status(Status::Eligible, root.path().display());
    for marker in root.marker_files() {
        println!("{}", marker.display());
    }

    Ok(())
}
