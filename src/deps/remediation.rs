//! Applying remediations for missing or outdated dependencies.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::deps::Remediation;
use crate::error::{CairnError, Result};
use crate::ui::UserInterface;

/// Mockable collaborators for applying remediations.
pub struct RemediationContext<'a> {
    /// Run a shell command line in a working directory, returning true on success.
    pub run_command: &'a dyn Fn(&Path, &str) -> bool,
    /// Open a URL in the default browser, returning true on success.
    pub open_url: &'a dyn Fn(&str) -> bool,
    /// Download a file, optionally verifying a SHA-256 checksum.
    pub download: &'a dyn Fn(&str, &Path, Option<&str>) -> Result<()>,
}

/// Build the default `RemediationContext` for production use.
pub fn default_context() -> RemediationContext<'static> {
    RemediationContext {
        run_command: &|cwd, cmd| crate::shell::run_shell(cmd, cwd).is_ok_and(|r| r.success),
        open_url: &|url| crate::shell::open_url(url).is_ok(),
        download: &|url, dest, sha256| crate::net::download_file(url, dest, sha256),
    }
}

/// Apply a remediation for `dependency`.
///
/// Relative download destinations resolve against `root`. A `Hint`
/// remediation only prints instructions and cannot fail.
pub fn apply(
    remediation: &Remediation,
    dependency: &str,
    root: &Path,
    ui: &mut dyn UserInterface,
    ctx: &RemediationContext<'_>,
) -> Result<()> {
    info!(dependency, action = %remediation, "applying remediation");

    match remediation {
        Remediation::Command { run } => {
            ui.message(&format!("Running `{}`", run));
            if (ctx.run_command)(root, run) {
                Ok(())
            } else {
                Err(CairnError::RemediationFailed {
                    dependency: dependency.to_string(),
                    message: format!("`{}` exited with a failure status", run),
                })
            }
        }
        Remediation::Open { url } => {
            ui.message(&format!("Opening {}", url));
            if (ctx.open_url)(url) {
                Ok(())
            } else {
                Err(CairnError::RemediationFailed {
                    dependency: dependency.to_string(),
                    message: format!("could not open {}", url),
                })
            }
        }
        Remediation::Download { url, dest, sha256 } => {
            let target: PathBuf = if dest.is_absolute() {
                dest.clone()
            } else {
                root.join(dest)
            };
            ui.message(&format!("Downloading {} to {}", url, target.display()));
            (ctx.download)(url, &target, sha256.as_deref()).map_err(|e| {
                CairnError::RemediationFailed {
                    dependency: dependency.to_string(),
                    message: e.to_string(),
                }
            })
        }
        Remediation::Hint { text } => {
            ui.message(text);
            Ok(())
        }
    }
}
