//! Persisting the workspace root in the host environment.
//!
//! After a successful run the root directory can be recorded so later
//! builds find the workspace without re-running the bootstrap. On Windows
//! that is `setx`; on Unix it is an export line appended to the user's
//! shell profile. Either way the value only reaches new sessions, which
//! the caller reports as a caveat rather than a failure.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::shell::ShellType;

/// How the variable was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// An export line was appended to a shell profile.
    Appended { profile: PathBuf },
    /// The profile already carries the exact line; nothing was written.
    AlreadyPresent { profile: PathBuf },
    /// `setx` wrote the user environment store.
    Registered,
}

/// Persist `name` = the workspace root in the host environment.
#[cfg(windows)]
pub fn persist_root_env(name: &str, root: &Path) -> Result<PersistOutcome> {
    use crate::error::CairnError;

    let value = root.display().to_string();
    let result = crate::shell::execute(
        "setx",
        &[name.to_string(), value],
        root,
    )?;
    if result.success {
        Ok(PersistOutcome::Registered)
    } else {
        Err(CairnError::CommandFailed {
            command: format!("setx {name}"),
            code: result.exit_code,
        })
    }
}

/// Persist `name` = the workspace root in the host environment.
#[cfg(not(windows))]
pub fn persist_root_env(name: &str, root: &Path) -> Result<PersistOutcome> {
    use anyhow::anyhow;

    let home = std::env::var("HOME").map_err(|_| anyhow!("HOME is not set"))?;
    let shell = crate::shell::detect_shell();
    let profile = select_profile(&shell.profile_candidates(Path::new(&home)));
    let line = export_line(shell, name, &root.display().to_string());

    if append_once(&profile, &line)? {
        debug!(profile = %profile.display(), %line, "export line appended");
        Ok(PersistOutcome::Appended { profile })
    } else {
        Ok(PersistOutcome::AlreadyPresent { profile })
    }
}

/// First existing candidate wins; otherwise the preferred one is created.
fn select_profile(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .unwrap_or_else(|| candidates[0].clone())
}

/// The profile line that sets `name` for this shell.
fn export_line(shell: ShellType, name: &str, value: &str) -> String {
    match shell {
        ShellType::Fish => format!("set -gx {name} \"{value}\""),
        _ => format!("export {name}=\"{value}\""),
    }
}

/// Append `line` to `profile` unless an identical line is already there.
///
/// Returns whether anything was written, keeping repeat runs from piling
/// up duplicate exports.
fn append_once(profile: &Path, line: &str) -> Result<bool> {
    if let Some(parent) = profile.parent() {
        fs::create_dir_all(parent)?;
    }

    let existing = match fs::read_to_string(profile) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    if existing.lines().any(|l| l.trim() == line) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');
    fs::write(profile, content)?;
    Ok(true)
}
