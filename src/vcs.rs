//! Git operations on the workspace.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::shell::{self, CommandResult};

/// Bring git submodules up to date.
///
/// Runs `git submodule update --init --recursive` in `root`. Failure is
/// reported to the caller but treated as advisory under the default
/// policy: a stale submodule surfaces later as a build error, not a
/// bootstrap abort.
pub fn sync_submodules(root: &Path) -> io::Result<CommandResult> {
    debug!(root = %root.display(), "synchronizing git submodules");
    let args = ["submodule", "update", "--init", "--recursive"].map(String::from);
    shell::execute("git", &args, root)
}
