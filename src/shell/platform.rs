//! Shell detection and host environment checks.
//!
//! Persisting the root environment variable on Unix means appending to the
//! user's shell profile, so we need to know which shell they run and where
//! that shell reads configuration from.

use std::path::{Path, PathBuf};

/// Known Unix shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl ShellType {
    /// Classify a shell from its executable path or name.
    pub fn from_executable(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        match name {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            _ => ShellType::Unknown,
        }
    }

    /// Profile files this shell reads, in preference order.
    ///
    /// The first existing file wins; if none exist the first candidate is
    /// created. Zsh honors `ZDOTDIR` when set.
    pub fn profile_candidates(&self, home: &Path) -> Vec<PathBuf> {
        match self {
            ShellType::Bash => vec![home.join(".bashrc"), home.join(".bash_profile")],
            ShellType::Zsh => {
                let zdotdir = std::env::var("ZDOTDIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| home.to_path_buf());
                vec![zdotdir.join(".zshrc")]
            }
            ShellType::Fish => vec![home.join(".config").join("fish").join("config.fish")],
            ShellType::Unknown => vec![home.join(".profile")],
        }
    }
}

/// Detect the user's shell from `SHELL`.
pub fn detect_shell() -> ShellType {
    match std::env::var("SHELL") {
        Ok(shell) => ShellType::from_executable(&shell),
        Err(_) => ShellType::Unknown,
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`: CI runs must never sit
/// on a remediation prompt. Checks common CI environment variables: `CI`,
/// `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// A bootstrap run as root leaves generated trees owned by root, which
/// breaks later unprivileged builds, so the run command warns about it.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}
